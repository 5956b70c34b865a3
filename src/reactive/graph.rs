//! Arena of reactive cells.
//!
//! Every cell lives in one [`CellGraph`] and is addressed by a copyable, typed handle:
//!
//! - [`Source`]: a primitive cell assigned directly with [`CellGraph::set`];
//! - [`Cell`]: any readable cell, including computed cells built with [`CellGraph::computed`];
//! - [`Wrapper`]: a cell forwarding one upstream cell, re-pointed with [`CellGraph::wrap`]
//!   while its own subscribers stay attached.
//!
//! Propagation is push-based and eager. Assigning a value equal to the current one is a
//! no-op; otherwise every subscriber runs synchronously in subscription order, and computed
//! cells recompute once per notification they receive.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Arena key of a cell.
    pub struct CellId;
    /// Key of a registered subscription handler.
    pub struct SubscriptionId;
}

/// Values storable in a cell. Equality decides whether an assignment notifies.
pub trait CellValue: Clone + PartialEq + fmt::Debug + 'static {}

impl<T: Clone + PartialEq + fmt::Debug + 'static> CellValue for T {}

trait Slot: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn clone_slot(&self) -> Box<dyn Slot>;
    fn same(&self, other: &dyn Slot) -> bool;
}

impl<T: CellValue> Slot for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_slot(&self) -> Box<dyn Slot> {
        Box::new(self.clone())
    }

    fn same(&self, other: &dyn Slot) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
}

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T> {
            id: CellId,
            _marker: PhantomData<fn() -> T>,
        }

        impl<T> $name<T> {
            pub(crate) fn from_id(id: CellId) -> Self {
                Self {
                    id,
                    _marker: PhantomData,
                }
            }

            /// Arena key of the underlying cell.
            pub fn id(&self) -> CellId {
                self.id
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> PartialEq for $name<T> {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl<T> Eq for $name<T> {}

        impl<T> Hash for $name<T> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.id)
            }
        }

        impl<T: CellValue> AsCell for $name<T> {
            type Value = T;

            fn as_cell(self) -> Cell<T> {
                Cell::from_id(self.id)
            }
        }
    };
}

handle! {
    /// Read handle to any cell.
    Cell
}

handle! {
    /// Handle to a primitive cell that can be assigned.
    Source
}

handle! {
    /// Handle to a wrapper cell whose upstream can be swapped.
    Wrapper
}

/// Anything that can be read as a typed cell.
pub trait AsCell: Copy {
    /// Type of the value held.
    type Value: CellValue;

    /// The cell as a read handle.
    fn as_cell(self) -> Cell<Self::Value>;
}

impl<T: CellValue> From<Source<T>> for Cell<T> {
    fn from(s: Source<T>) -> Self {
        s.as_cell()
    }
}

impl<T: CellValue> From<Wrapper<T>> for Cell<T> {
    fn from(w: Wrapper<T>) -> Self {
        w.as_cell()
    }
}

/// Flavor of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// Assigned directly.
    Primitive,
    /// Derived from other cells.
    Computed,
    /// Forwards one upstream cell.
    Wrapper,
}

type Compute = Rc<dyn Fn(&CellGraph) -> Box<dyn Slot>>;

enum Kind {
    Primitive,
    Computed {
        deps: SmallVec<[CellId; 4]>,
        compute: Compute,
    },
    Wrapper {
        upstream: CellId,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Subscriber {
    Cell(CellId),
    Handler(SubscriptionId),
}

struct Node {
    value: Box<dyn Slot>,
    kind: Kind,
    subscribers: SmallVec<[Subscriber; 4]>,
}

impl Node {
    fn new(value: Box<dyn Slot>, kind: Kind) -> Self {
        Self {
            value,
            kind,
            subscribers: SmallVec::new(),
        }
    }
}

struct Handler {
    cell: CellId,
    callback: Rc<dyn Fn(&dyn Any)>,
}

/// Owner of every cell of one animation session.
#[derive(Default)]
pub struct CellGraph {
    nodes: SlotMap<CellId, Node>,
    handlers: SlotMap<SubscriptionId, Handler>,
    next_token: u64,
}

impl fmt::Debug for CellGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellGraph")
            .field("cells", &self.nodes.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl CellGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells ever created in this graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no cell was ever created.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a primitive cell.
    pub fn primitive<T: CellValue>(&mut self, value: T) -> Source<T> {
        let id = self.nodes.insert(Node::new(Box::new(value), Kind::Primitive));
        Source::from_id(id)
    }

    /// Create a primitive cell nobody is expected to assign.
    pub fn constant<T: CellValue>(&mut self, value: T) -> Cell<T> {
        self.primitive(value).as_cell()
    }

    /// Create a computed cell over `deps`.
    ///
    /// `f` must only read cells listed in `deps`; the value is computed immediately and
    /// again on every notification from any dependency.
    pub fn computed<T: CellValue>(
        &mut self,
        deps: &[CellId],
        f: impl Fn(&CellGraph) -> T + 'static,
    ) -> Cell<T> {
        let compute: Compute = Rc::new(move |g| -> Box<dyn Slot> { Box::new(f(g)) });
        let value = compute(self);
        let id = self.nodes.insert(Node::new(
            value,
            Kind::Computed {
                deps: deps.iter().copied().collect(),
                compute,
            },
        ));
        for dep in deps {
            if let Some(node) = self.nodes.get_mut(*dep) {
                node.subscribers.push(Subscriber::Cell(id));
            }
        }
        Cell::from_id(id)
    }

    /// Computed cell over a single dependency.
    pub fn map<A: AsCell, T: CellValue>(
        &mut self,
        a: A,
        f: impl Fn(&A::Value) -> T + 'static,
    ) -> Cell<T> {
        let a = a.as_cell();
        self.computed(&[a.id()], move |g| g.with(a, &f))
    }

    /// Computed cell over two dependencies.
    pub fn map2<A: AsCell, B: AsCell, T: CellValue>(
        &mut self,
        a: A,
        b: B,
        f: impl Fn(&A::Value, &B::Value) -> T + 'static,
    ) -> Cell<T> {
        let (a, b) = (a.as_cell(), b.as_cell());
        self.computed(&[a.id(), b.id()], move |g| {
            g.with(a, |a| g.with(b, |b| f(a, b)))
        })
    }

    /// Create a wrapper forwarding `upstream`.
    ///
    /// # Panics
    ///
    /// Panics if `upstream` was not created by this graph.
    pub fn wrapper<C: AsCell>(&mut self, upstream: C) -> Wrapper<C::Value> {
        let upstream = upstream.as_cell();
        let value = self.get(upstream);
        let id = self.nodes.insert(Node::new(
            Box::new(value),
            Kind::Wrapper {
                upstream: upstream.id(),
            },
        ));
        if let Some(node) = self.nodes.get_mut(upstream.id()) {
            node.subscribers.push(Subscriber::Cell(id));
        }
        Wrapper::from_id(id)
    }

    /// Current value of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` was not created by this graph. See [`CellGraph::try_get`].
    pub fn get<C: AsCell>(&self, cell: C) -> C::Value {
        self.with(cell, Clone::clone)
    }

    /// Current value of `cell`, or `None` if it belongs to another graph.
    pub fn try_get<C: AsCell>(&self, cell: C) -> Option<C::Value> {
        self.value_ref(cell.as_cell()).cloned()
    }

    /// Borrow the current value of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` was not created by this graph.
    pub fn with<C: AsCell, R>(&self, cell: C, f: impl FnOnce(&C::Value) -> R) -> R {
        let cell = cell.as_cell();
        match self.value_ref(cell) {
            Some(v) => f(v),
            None => panic!("{cell:?} does not belong to this graph"),
        }
    }

    fn value_ref<T: CellValue>(&self, cell: Cell<T>) -> Option<&T> {
        self.nodes.get(cell.id())?.value.as_any().downcast_ref::<T>()
    }

    /// Flavor of `cell`, or `None` for an unknown key.
    pub fn kind(&self, cell: CellId) -> Option<CellKind> {
        self.nodes.get(cell).map(|n| match n.kind {
            Kind::Primitive => CellKind::Primitive,
            Kind::Computed { .. } => CellKind::Computed,
            Kind::Wrapper { .. } => CellKind::Wrapper,
        })
    }

    /// Assign a primitive cell. Subscribers run only if the value changed.
    pub fn set<T: CellValue>(&mut self, source: Source<T>, value: T) {
        self.assign(source.id(), Box::new(value));
    }

    /// Point `wrapper` at `upstream`.
    ///
    /// The wrapper stops observing its previous upstream, adopts the new value (notifying
    /// its own subscribers if it differs) and then observes `upstream`.
    ///
    /// `upstream` must not depend on `wrapper`; debug builds assert this.
    pub fn wrap<C: AsCell>(&mut self, wrapper: Wrapper<C::Value>, upstream: C) {
        self.rewrap_raw(wrapper.id(), upstream.as_cell().id());
    }

    /// The cell `wrapper` currently forwards.
    pub fn unwrap<T: CellValue>(&self, wrapper: Wrapper<T>) -> Cell<T> {
        match self.upstream_raw(wrapper.id()) {
            Some(id) => Cell::from_id(id),
            None => wrapper.as_cell(),
        }
    }

    pub(crate) fn upstream_raw(&self, wrapper: CellId) -> Option<CellId> {
        match self.nodes.get(wrapper)?.kind {
            Kind::Wrapper { upstream } => Some(upstream),
            _ => None,
        }
    }

    /// Untyped [`CellGraph::wrap`]. Both cells must hold the same value type.
    pub(crate) fn rewrap_raw(&mut self, wrapper: CellId, upstream: CellId) {
        debug_assert!(
            !self.depends_on(upstream, wrapper),
            "wrapping {wrapper:?} around {upstream:?} would create a dependency cycle"
        );
        let Some(value) = self.nodes.get(upstream).map(|n| n.value.clone_slot()) else {
            return;
        };
        let old = match self.nodes.get_mut(wrapper).map(|n| &mut n.kind) {
            Some(Kind::Wrapper { upstream: current }) => std::mem::replace(current, upstream),
            _ => return,
        };
        if let Some(node) = self.nodes.get_mut(old)
            && let Some(pos) = node
                .subscribers
                .iter()
                .position(|s| *s == Subscriber::Cell(wrapper))
        {
            node.subscribers.remove(pos);
        }
        self.assign(wrapper, value);
        if let Some(node) = self.nodes.get_mut(upstream) {
            node.subscribers.push(Subscriber::Cell(wrapper));
        }
    }

    /// Register a handler called with every new value of `cell`.
    ///
    /// The handler is not called on registration.
    pub fn subscribe<C: AsCell>(
        &mut self,
        cell: C,
        handler: impl Fn(&C::Value) + 'static,
    ) -> SubscriptionId {
        let cell = cell.as_cell();
        let callback: Rc<dyn Fn(&dyn Any)> = Rc::new(move |v: &dyn Any| {
            if let Some(v) = v.downcast_ref::<C::Value>() {
                handler(v);
            }
        });
        let id = self.handlers.insert(Handler {
            cell: cell.id(),
            callback,
        });
        if let Some(node) = self.nodes.get_mut(cell.id()) {
            node.subscribers.push(Subscriber::Handler(id));
        }
        id
    }

    /// Remove a handler. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(handler) = self.handlers.remove(id) else {
            return false;
        };
        if let Some(node) = self.nodes.get_mut(handler.cell) {
            node.subscribers.retain(|s| *s != Subscriber::Handler(id));
        }
        true
    }

    /// Whether `cell` reads `target`, directly or transitively (a cell depends on itself).
    pub fn depends_on(&self, cell: CellId, target: CellId) -> bool {
        let mut stack = vec![cell];
        let mut seen = HashSet::new();
        while let Some(id) = stack.pop() {
            if id == target {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            match self.nodes.get(id).map(|n| &n.kind) {
                Some(Kind::Computed { deps, .. }) => stack.extend(deps.iter().copied()),
                Some(Kind::Wrapper { upstream }) => stack.push(*upstream),
                _ => {}
            }
        }
        false
    }

    /// Engine-unique token, used for keys that must not collide with user keys.
    pub fn mint_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn assign(&mut self, id: CellId, value: Box<dyn Slot>) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.value.same(value.as_ref()) {
            return;
        }
        node.value = value;
        let subscribers = node.subscribers.clone();
        for sub in subscribers {
            match sub {
                Subscriber::Cell(dependent) => self.refresh(dependent),
                Subscriber::Handler(handler) => self.fire(handler, id),
            }
        }
    }

    fn refresh(&mut self, id: CellId) {
        let next = match self.nodes.get(id).map(|n| &n.kind) {
            Some(Kind::Computed { compute, .. }) => {
                let compute = Rc::clone(compute);
                compute(self)
            }
            Some(Kind::Wrapper { upstream }) => match self.nodes.get(*upstream) {
                Some(up) => up.value.clone_slot(),
                None => return,
            },
            _ => return,
        };
        self.assign(id, next);
    }

    fn fire(&self, handler: SubscriptionId, cell: CellId) {
        if let (Some(h), Some(node)) = (self.handlers.get(handler), self.nodes.get(cell)) {
            (h.callback)(node.value.as_any());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reactive/graph.rs"]
mod tests;
