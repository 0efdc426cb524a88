use crate::data_structures::BitField;

#[test]
pub fn set_and_get_past_capacity() {
	let mut bits = BitField::new();
	assert!(!bits.get(100), "Unallocated bits must read as unset");

	bits.set(100, true);
	assert!(bits.get(100));
	assert!(bits.capacity() >= 101);

	bits.set(100, false);
	bits.set(1000, false);
	assert!(bits.is_empty());
	assert!(bits.capacity() < 1000, "Clearing a bit must not grow the field");
}

#[test]
pub fn subset_and_intersection() {
	let mut mask = BitField::new();
	mask.set(3, true);
	mask.set(40, true);

	let mut active = BitField::with_capacity(128);
	active.set(3, true);
	assert!(!mask.is_subset_of(&active));
	assert!(mask.intersects(&active));

	active.set(40, true);
	active.set(90, true);
	assert!(mask.is_subset_of(&active));
	assert!(!active.is_subset_of(&mask));

	assert!(BitField::new().is_subset_of(&mask), "An empty mask is a subset of anything");
	assert!(!BitField::new().intersects(&mask));
}

#[test]
pub fn equality_ignores_capacity() {
	let mut a = BitField::new();
	let mut b = BitField::with_capacity(256);
	a.set(7, true);
	b.set(7, true);

	assert_eq!(a, b);
	b.set(200, true);
	assert_ne!(a, b);
}

#[test]
pub fn iterate_raised_bits() {
	let mut bits = BitField::new();
	for i in [0, 31, 32, 63, 64, 150] {
		bits.set(i, true);
	}

	assert_eq!(bits.iter_ones().collect::<Vec<_>>(), vec![0, 31, 32, 63, 64, 150]);
	assert_eq!(bits.count_ones(), 6);

	bits.clear();
	assert_eq!(bits.iter_ones().next(), None);
}
