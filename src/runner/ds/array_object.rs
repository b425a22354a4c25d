use crate::runner::ds::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

pub fn new_array(items: Vec<Value>) -> ArrayRef {
    Rc::new(RefCell::new(items))
}

pub fn array_length(array: &ArrayRef) -> usize {
    array.borrow().len()
}

/// Reads the element at `idx`, yielding `undefined` past the end.
pub fn array_get(array: &ArrayRef, idx: usize) -> Value {
    array.borrow().get(idx).cloned().unwrap_or(Value::Undefined)
}
