//! Multi-cast delegates
//!
//! An immutable ordered list of (owner, method) pairs behind a dedicated
//! type. Combine and remove are pure functions producing new delegate
//! values or `None`; the backing list is never mutated in place, so a pair
//! observed at call time is exactly the pair set the delegate was built
//! with.

use std::fmt;
use std::rc::Rc;

type Method<T> = Rc<dyn Fn(&T)>;

/// One invocation target: an optional owner identity token plus the method
pub struct DelegateTarget<T> {
    owner: Option<usize>,
    method: Method<T>,
}

impl<T> Clone for DelegateTarget<T> {
    fn clone(&self) -> Self {
        DelegateTarget {
            owner: self.owner,
            method: Rc::clone(&self.method),
        }
    }
}

impl<T> DelegateTarget<T> {
    fn same_as(&self, other: &DelegateTarget<T>) -> bool {
        self.owner == other.owner && Rc::ptr_eq(&self.method, &other.method)
    }
}

/// An immutable multi-cast delegate over `(owner, method)` pairs
///
/// Cloning shares the backing list; two clones compare as the identical
/// delegate for removal purposes.
pub struct Delegate<T> {
    targets: Rc<Vec<DelegateTarget<T>>>,
}

impl<T> Clone for Delegate<T> {
    fn clone(&self) -> Self {
        Delegate {
            targets: Rc::clone(&self.targets),
        }
    }
}

impl<T> fmt::Debug for Delegate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delegate({} targets)", self.targets.len())
    }
}

impl<T> Delegate<T> {
    /// Delegate over a single bare callback with no owner
    pub fn new(method: impl Fn(&T) + 'static) -> Self {
        Delegate::from_targets(vec![DelegateTarget {
            owner: None,
            method: Rc::new(method),
        }])
    }

    /// Delegate over a single callback bound to an owner identity token
    pub fn with_owner(owner: usize, method: impl Fn(&T) + 'static) -> Self {
        Delegate::from_targets(vec![DelegateTarget {
            owner: Some(owner),
            method: Rc::new(method),
        }])
    }

    fn from_targets(targets: Vec<DelegateTarget<T>>) -> Self {
        Delegate {
            targets: Rc::new(targets),
        }
    }

    /// Number of invocation targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// A delegate always carries at least one target
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Invoke every target in combine order
    ///
    /// Return values are never aggregated.
    pub fn invoke(&self, arg: &T) {
        let snapshot = Rc::clone(&self.targets);
        for target in snapshot.iter() {
            (target.method)(arg);
        }
    }

    fn first(&self) -> &DelegateTarget<T> {
        &self.targets[0]
    }
}

/// Combine two optional delegates into one
///
/// Absent plus anything yields the other unchanged; two present delegates
/// yield a new delegate over the concatenated pair lists.
pub fn delegate_combine<T>(
    d1: Option<Delegate<T>>,
    d2: Option<Delegate<T>>,
) -> Option<Delegate<T>> {
    match (d1, d2) {
        (None, other) => other,
        (other, None) => other,
        (Some(first), Some(second)) => {
            let mut targets = first.targets.as_ref().clone();
            targets.extend(second.targets.iter().cloned());
            Some(Delegate::from_targets(targets))
        }
    }
}

/// Remove one occurrence of `d2`'s first pair from `d1`
///
/// The identical delegate (shared backing list) removes to `None`; an
/// absent `d2` leaves `d1` unchanged; otherwise the first matching pair is
/// removed, yielding `None` when the list empties and `d1` unchanged when
/// nothing matches.
pub fn delegate_remove<T>(
    d1: Option<Delegate<T>>,
    d2: Option<&Delegate<T>>,
) -> Option<Delegate<T>> {
    let d1 = d1?;
    let Some(d2) = d2 else {
        return Some(d1);
    };

    if Rc::ptr_eq(&d1.targets, &d2.targets) {
        return None;
    }

    let needle = d2.first();
    match d1.targets.iter().position(|t| t.same_as(needle)) {
        Some(position) => {
            if d1.targets.len() == 1 {
                return None;
            }
            let mut targets = d1.targets.as_ref().clone();
            targets.remove(position);
            Some(Delegate::from_targets(targets))
        }
        None => Some(d1),
    }
}
