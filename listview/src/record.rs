/// Bound for list records.
///
/// Records are compared by key (or identity, e.g. via a pointer-comparing wrapper) and cloned
/// into the views that display them, so cheap handles (`Rc`, `Arc`, ids) work best.
pub trait Record: Clone + PartialEq {}
impl<T: Clone + PartialEq> Record for T {}
