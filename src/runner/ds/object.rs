use crate::runner::ds::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::iter::FromIterator;
use std::rc::Rc;

pub type ObjectRef = Rc<RefCell<Object>>;

/// An ordinary object: string-keyed own properties plus an optional prototype.
///
/// Own keys enumerate the way a JavaScript host enumerates them: canonical array
/// indices first in ascending numeric order, then every other key in insertion order.
#[derive(Debug)]
pub struct Object {
    properties: HashMap<String, Value>,
    insertion_order: Vec<String>,
    prototype: Option<ObjectRef>,
}
impl Object {
    pub fn new() -> Self {
        Object {
            properties: HashMap::new(),
            insertion_order: Vec::new(),
            prototype: None,
        }
    }

    pub fn with_prototype(prototype: ObjectRef) -> Self {
        Object {
            properties: HashMap::new(),
            insertion_order: Vec::new(),
            prototype: Some(prototype),
        }
    }

    pub fn into_ref(self) -> ObjectRef {
        Rc::new(RefCell::new(self))
    }

    /// Builder-style insert, handy for literals in tests and fixtures.
    pub fn insert(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    pub fn get_prototype_of(&self) -> Option<ObjectRef> {
        self.prototype.as_ref().map(Rc::clone)
    }

    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Looks `key` up on this object, then along the prototype chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(v) = self.properties.get(key) {
            return Some(v.clone());
        }
        let mut next = self.get_prototype_of();
        while let Some(p) = next {
            let p = p.borrow();
            if let Some(v) = p.properties.get(key) {
                return Some(v.clone());
            }
            next = p.get_prototype_of();
        }
        None
    }

    pub fn has_own_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Inserts or overwrites an own property. An overwritten key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if !self.properties.contains_key(&key) {
            self.insertion_order.push(key.clone());
        }
        self.properties.insert(key, value);
    }

    pub fn own_keys(&self) -> Vec<String> {
        let mut indices: Vec<(u32, &String)> = self
            .insertion_order
            .iter()
            .filter_map(|k| canonical_array_index(k).map(|idx| (idx, k)))
            .collect();
        indices.sort_by_key(|(idx, _)| *idx);

        let mut keys: Vec<String> = indices.into_iter().map(|(_, k)| k.clone()).collect();
        keys.extend(
            self.insertion_order
                .iter()
                .filter(|k| canonical_array_index(k).is_none())
                .cloned(),
        );
        keys
    }

    /// Own `(key, value)` entries in enumeration order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.own_keys()
            .into_iter()
            .filter_map(|k| {
                let v = self.properties.get(&k)?.clone();
                Some((k, v))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (k, v) in iter {
            object.set(k, v);
        }
        object
    }
}

/// Returns the numeric value of `key` when it is a canonical array index
/// ("0", "1", ... up to 2^32 - 2, no leading zeros or signs).
pub fn canonical_array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match key.parse::<u32>() {
        Ok(idx) if idx != u32::MAX => Some(idx),
        _ => None,
    }
}
