//! # Node Identity Contract
//!
//! Every node kind is a Rust type implementing [`NodeClass`]. The class itself
//! is passed around as a value through [`Klass`], which is what the registry
//! stores; instances are handled as `dyn Node`.
//!
//! ```rust,ignore
//! #[derive(Debug)]
//! struct MentionNode { handle: String }
//!
//! impl NodeClass for MentionNode {
//!     fn get_type() -> &'static str {
//!         "mention"
//!     }
//! }
//!
//! let klass = Klass::of::<MentionNode>();
//! assert_eq!(klass.get_type(), "mention");
//! ```

use crate::EditorError;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Key identifying a node instance inside an editor state
pub type NodeKey = String;

/// Static contract implemented by every node type
pub trait NodeClass: fmt::Debug + 'static {
    /// Stable type tag, used as the registry key
    fn get_type() -> &'static str;

    /// Mutation hook run by the update cycle whenever a node of this type is touched
    fn transform() -> Option<Transform> {
        None
    }
}

/// Object-safe view of a node instance
pub trait Node: Any + fmt::Debug {
    fn node_type(&self) -> &'static str;

    /// The exact class of this instance
    fn klass(&self) -> Klass;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: NodeClass> Node for T {
    fn node_type(&self) -> &'static str {
        T::get_type()
    }

    fn klass(&self) -> Klass {
        Klass::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn Node {
    pub fn is<T: NodeClass>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: NodeClass>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: NodeClass>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// A node class as a value
///
/// Equality is exact-class identity: two classes sharing a type tag are
/// still different `Klass` values.
#[derive(Clone, Copy)]
pub struct Klass {
    id: TypeId,
    name: &'static str,
    get_type: fn() -> &'static str,
    transform: fn() -> Option<Transform>,
}

impl Klass {
    pub fn of<T: NodeClass>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            get_type: T::get_type,
            transform: T::transform,
        }
    }

    pub fn get_type(&self) -> &'static str {
        (self.get_type)()
    }

    pub fn transform(&self) -> Option<Transform> {
        (self.transform)()
    }

    /// Unqualified Rust type name, for diagnostics
    pub fn name(&self) -> &'static str {
        let path = self.name.split('<').next().unwrap_or(self.name);
        path.rsplit("::").next().unwrap_or(path)
    }

    /// True when `node` is exactly of this class (not merely sharing its tag)
    pub fn is_class_of(&self, node: &dyn Node) -> bool {
        node.klass() == *self
    }
}

impl PartialEq for Klass {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Klass {}

impl Hash for Klass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Klass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Klass")
            .field("name", &self.name())
            .field("type", &self.get_type())
            .finish()
    }
}

/// Shared node-mutation hook
///
/// Identity is the identity of the underlying allocation, so clones of one
/// `Transform` compare equal while two separately created hooks never do.
#[derive(Clone)]
pub struct Transform(Rc<dyn Fn(&mut dyn Node) -> Result<(), EditorError>>);

impl Transform {
    pub fn new(f: impl Fn(&mut dyn Node) -> Result<(), EditorError> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, node: &mut dyn Node) -> Result<(), EditorError> {
        (self.0)(node)
    }

    pub fn ptr_eq(&self, other: &Transform) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transform({:p})", Rc::as_ptr(&self.0))
    }
}

/// Insertion-ordered set of transforms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformSet {
    transforms: Vec<Transform>,
}

impl TransformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if this exact transform was already present
    pub fn insert(&mut self, transform: Transform) -> bool {
        if self.contains(&transform) {
            return false;
        }
        self.transforms.push(transform);
        true
    }

    pub fn contains(&self, transform: &Transform) -> bool {
        self.transforms.iter().any(|t| t.ptr_eq(transform))
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transform> {
        self.transforms.iter()
    }
}

impl Extend<Transform> for TransformSet {
    fn extend<I: IntoIterator<Item = Transform>>(&mut self, iter: I) {
        for transform in iter {
            self.insert(transform);
        }
    }
}
