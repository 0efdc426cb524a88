use crate::components::{Component, ComponentId};
use crate::data_structures::BitField;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::any::TypeId;
use std::sync::Arc;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

lazy_static! {
	static ref EMPTY_BITFIELD: Arc<BitField> = Arc::new(BitField::new());
	static ref TYPE_TO_BITFIELD: Mutex<HashMap<TypeId, Arc<BitField>, Hasher>> =
		Mutex::new(HashMap::default());
}

/// A tuple of [Component] types, used wherever a set of kinds is needed at once,
/// such as alternative kinds in an [InterestConfig](crate::groups::InterestConfig)
/// or [EntityStore::has_components](crate::entities::EntityStore::has_components).
pub trait ComponentSet: 'static {
	/// The [ComponentIds](ComponentId) of every type in the set, in declaration order.
	fn component_ids() -> Vec<ComponentId>;

	/// A cached [BitField] with the bit of every type in the set raised.
	fn get_bitfield() -> Arc<BitField>;
}

impl ComponentSet for () {
	fn component_ids() -> Vec<ComponentId> {
		Vec::new()
	}

	fn get_bitfield() -> Arc<BitField> {
		EMPTY_BITFIELD.clone()
	}
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        impl <$($t: Component),*> ComponentSet for ($($t),*,) {
            fn component_ids() -> Vec<ComponentId> {
                vec![$(<$t>::component_id()),*]
            }

            fn get_bitfield() -> Arc<BitField> {
                let key = TypeId::of::<Self>();
                let mut ttb = TYPE_TO_BITFIELD.lock();
                if let Some(bitfield) = ttb.get(&key) {
                    return bitfield.clone()
                }

                let components = Self::component_ids();
                let bitfield = Arc::new(BitField::from(components.as_slice()));
                ttb.insert(key, bitfield.clone());
                bitfield
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
