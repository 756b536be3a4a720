//! Type-safe provider resource identifiers.
//!
//! The provider hands out plain strings for every resource (`vpc-...`,
//! `rtb-...`, `subnet-...`, `rtbassoc-...`). Wrapping them in a typed
//! identifier keeps a subnet id from being passed where an association id is
//! expected, which is exactly the mix-up the disassociate path is prone to.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker trait for provider resource kinds.
pub trait ResourceKind: Send + Sync + 'static {
    /// Returns the resource type name for debugging.
    fn type_name() -> &'static str;
}

/// A provider identifier tagged with the kind of resource it names.
///
/// # Examples
///
/// ```
/// use routesync_types::{SubnetId, AssociationId};
///
/// let subnet = SubnetId::from("subnet-0a1b");
/// let assoc = AssociationId::from("rtbassoc-0c2d");
///
/// // This would fail to compile:
/// // fn takes_assoc(a: &AssociationId) {}
/// // takes_assoc(&subnet);
/// assert_eq!(subnet.as_str(), "subnet-0a1b");
/// assert_eq!(assoc.to_string(), "rtbassoc-0c2d");
/// ```
pub struct ResourceId<K: ResourceKind> {
    raw: String,
    _marker: PhantomData<K>,
}

impl<K: ResourceKind> ResourceId<K> {
    /// Creates an identifier from the provider's string form.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            _marker: PhantomData,
        }
    }

    /// Returns the provider's string form.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consumes the identifier, returning the provider's string form.
    pub fn into_inner(self) -> String {
        self.raw
    }
}

impl<K: ResourceKind> Clone for ResourceId<K> {
    fn clone(&self) -> Self {
        Self::new(self.raw.clone())
    }
}

impl<K: ResourceKind> fmt::Debug for ResourceId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", K::type_name(), self.raw)
    }
}

impl<K: ResourceKind> fmt::Display for ResourceId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<K: ResourceKind> PartialEq for ResourceId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K: ResourceKind> Eq for ResourceId<K> {}

impl<K: ResourceKind> PartialOrd for ResourceId<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: ResourceKind> Ord for ResourceId<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K: ResourceKind> Hash for ResourceId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: ResourceKind> From<&str> for ResourceId<K> {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<K: ResourceKind> From<String> for ResourceId<K> {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl<K: ResourceKind> Serialize for ResourceId<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, K: ResourceKind> Deserialize<'de> for ResourceId<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

macro_rules! define_resource_kind {
    ($kind:ident, $alias:ident, $name:expr) => {
        #[doc = concat!("Marker type for ", $name, " identifiers.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $kind {}

        impl ResourceKind for $kind {
            fn type_name() -> &'static str {
                $name
            }
        }

        #[doc = concat!("Identifier of a ", $name, ".")]
        pub type $alias = ResourceId<$kind>;
    };
}

define_resource_kind!(VpcKind, VpcId, "Vpc");
define_resource_kind!(RouteTableKind, RouteTableId, "RouteTable");
define_resource_kind!(SubnetKind, SubnetId, "Subnet");
define_resource_kind!(AssociationKind, AssociationId, "Association");
