use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use lasso::{Rodeo, Spur};

use crate::capability::Dynamic;
use crate::error::DynError;

thread_local! {
    static INTERNER: RefCell<Rodeo> = RefCell::new(Rodeo::default());
}

/// Intern a string, returning a Spur key.
pub fn intern(s: &str) -> Spur {
    INTERNER.with(|r| r.borrow_mut().get_or_intern(s))
}

/// Resolve a Spur key back to a String.
pub fn resolve(spur: Spur) -> String {
    INTERNER.with(|r| r.borrow().resolve(&spur).to_string())
}

/// Resolve a Spur and call f with the &str, avoiding allocation.
pub fn with_resolved<F, R>(spur: Spur, f: F) -> R
where
    F: FnOnce(&str) -> R,
{
    INTERNER.with(|r| {
        let interner = r.borrow();
        f(interner.resolve(&spur))
    })
}

/// A key addressing into a container or naming a method in a message:
/// positional (`Index`) or named (`Name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    Index(i64),
    Name(Spur),
}

impl Selector {
    pub fn index(i: i64) -> Selector {
        Selector::Index(i)
    }

    pub fn name(s: &str) -> Selector {
        Selector::Name(intern(s))
    }

    /// Convert a dynamic value into a selector.
    ///
    /// # Panics
    ///
    /// Panics if the value is neither an int nor a string.
    pub fn from_value(v: &Value) -> Selector {
        match v {
            Value::Int(n) => Selector::Index(*n),
            Value::Str(s) => Selector::Name(intern(s)),
            other => panic!(
                "latebind: selector must be an int or a string, got {}",
                other.type_name()
            ),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(i) => write!(f, "{i}"),
            Selector::Name(s) => with_resolved(*s, |name| write!(f, "{name}")),
        }
    }
}

impl From<i64> for Selector {
    fn from(i: i64) -> Selector {
        Selector::Index(i)
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Selector {
        Selector::name(s)
    }
}

/// The declared key kind of a map value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Int,
    Str,
}

/// A map key. Only keys matching the map's declared [`KeyKind`] occur in
/// a given map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKey {
    Int(i64),
    Str(Spur),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Int(i) => write!(f, "{i}"),
            MapKey::Str(s) => with_resolved(*s, |name| write!(f, "\"{name}\"")),
        }
    }
}

/// A keyed container with a declared key kind. Selecting with the wrong
/// kind of selector is caller misuse, not a miss.
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
    pub keys: KeyKind,
    pub entries: HashMap<MapKey, Value>,
}

impl MapValue {
    pub fn empty(keys: KeyKind) -> MapValue {
        MapValue {
            keys,
            entries: HashMap::new(),
        }
    }

    pub fn from_str_entries(entries: Vec<(&str, Value)>) -> MapValue {
        MapValue {
            keys: KeyKind::Str,
            entries: entries
                .into_iter()
                .map(|(k, v)| (MapKey::Str(intern(k)), v))
                .collect(),
        }
    }

    pub fn from_int_entries(entries: Vec<(i64, Value)>) -> MapValue {
        MapValue {
            keys: KeyKind::Int,
            entries: entries
                .into_iter()
                .map(|(k, v)| (MapKey::Int(k), v))
                .collect(),
        }
    }
}

/// A record: tagged product type with named, ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub type_tag: Spur,
    pub fields: Vec<(Spur, Value)>,
}

/// What a host callable hands back before normalization: zero, one, or
/// several values. Application turns `None` into `Nil`, `One` into the
/// bare value, and `Many` into a result [`Value::Tuple`].
#[derive(Debug, Clone)]
pub enum Ret {
    None,
    One(Value),
    Many(Vec<Value>),
}

impl From<Value> for Ret {
    fn from(v: Value) -> Ret {
        Ret::One(v)
    }
}

impl From<Vec<Value>> for Ret {
    fn from(vs: Vec<Value>) -> Ret {
        Ret::Many(vs)
    }
}

/// A host function callable through [`crate::apply()`].
///
/// `params`, when present, declares the formal parameter kinds and enables
/// absence adaptation: a `Nil` argument supplied for a reference-like formal
/// is replaced with that kind's empty value before the call.
pub struct NativeFn {
    pub name: String,
    pub params: Option<Vec<Kind>>,
    pub func: Box<dyn Fn(&[Value]) -> Result<Ret, DynError>>,
}

impl NativeFn {
    pub fn new(
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Ret, DynError> + 'static,
    ) -> Self {
        NativeFn {
            name: name.into(),
            params: None,
            func: Box::new(f),
        }
    }

    pub fn with_params(
        name: impl Into<String>,
        params: Vec<Kind>,
        f: impl Fn(&[Value]) -> Result<Ret, DynError> + 'static,
    ) -> Self {
        NativeFn {
            name: name.into(),
            params: Some(params),
            func: Box::new(f),
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}

/// The closed kind tag of a dynamic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Nil,
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    Record,
    Tuple,
    Fn,
    Ref,
    Foreign,
}

impl Kind {
    /// Whether native equality is defined for this kind. Mirrors which of
    /// the host's kinds support `==`: scalars and records do, structural
    /// containers and callables do not.
    pub fn comparable(self) -> bool {
        matches!(
            self,
            Kind::Nil | Kind::Bool | Kind::Int | Kind::Float | Kind::Str | Kind::Record | Kind::Ref
        )
    }

    /// Whether a `Nil` argument bound to a formal of this kind adapts to
    /// the kind's zero value instead of propagating the sentinel.
    pub fn accepts_absence(self) -> bool {
        matches!(
            self,
            Kind::Fn | Kind::Map | Kind::List | Kind::Ref | Kind::Foreign
        )
    }

    /// The zero/empty value of this kind. For kinds whose zero is the
    /// absence sentinel itself (callables, refs, foreigns) this is `Nil`.
    pub fn empty_value(self) -> Value {
        match self {
            Kind::List => Value::list(Vec::new()),
            Kind::Map => Value::Map(Rc::new(MapValue::empty(KeyKind::Str))),
            _ => Value::Nil,
        }
    }
}

/// The core dynamic value type. Containers are `Rc`-shared; `clone` is
/// cheap and no operation retains its inputs past the call.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<String>),
    List(Rc<Vec<Value>>),
    Map(Rc<MapValue>),
    Record(Rc<Record>),
    /// Multi-value return packaging, distinct from `List` so a genuine
    /// multi-return can be told apart from a single sequence-shaped result.
    /// Never nested.
    Tuple(Rc<Vec<Value>>),
    Fn(Rc<NativeFn>),
    Ref(Rc<RefCell<Value>>),
    Foreign(Rc<dyn Dynamic>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Tuple(_) => Kind::Tuple,
            Value::Fn(_) => Kind::Fn,
            Value::Ref(_) => Kind::Ref,
            Value::Foreign(_) => Kind::Foreign,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::Tuple(_) => "tuple",
            Value::Fn(_) => "fn",
            Value::Ref(_) => "ref",
            Value::Foreign(obj) => obj.type_name(),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Rc<MapValue>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Rc<Record>> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn bool(b: bool) -> Value {
        Value::Bool(b)
    }

    pub fn int(n: i64) -> Value {
        Value::Int(n)
    }

    pub fn float(f: f64) -> Value {
        Value::Float(f)
    }

    pub fn str(s: &str) -> Value {
        Value::Str(Rc::new(s.to_string()))
    }

    pub fn list(v: Vec<Value>) -> Value {
        Value::List(Rc::new(v))
    }

    pub fn tuple(v: Vec<Value>) -> Value {
        Value::Tuple(Rc::new(v))
    }

    pub fn map_str(entries: Vec<(&str, Value)>) -> Value {
        Value::Map(Rc::new(MapValue::from_str_entries(entries)))
    }

    pub fn map_int(entries: Vec<(i64, Value)>) -> Value {
        Value::Map(Rc::new(MapValue::from_int_entries(entries)))
    }

    pub fn record(type_tag: &str, fields: Vec<(&str, Value)>) -> Value {
        Value::Record(Rc::new(Record {
            type_tag: intern(type_tag),
            fields: fields
                .into_iter()
                .map(|(name, v)| (intern(name), v))
                .collect(),
        }))
    }

    pub fn native(
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Ret, DynError> + 'static,
    ) -> Value {
        Value::Fn(Rc::new(NativeFn::new(name, f)))
    }

    pub fn native_with_params(
        name: impl Into<String>,
        params: Vec<Kind>,
        f: impl Fn(&[Value]) -> Result<Ret, DynError> + 'static,
    ) -> Value {
        Value::Fn(Rc::new(NativeFn::with_params(name, params, f)))
    }

    pub fn reference(v: Value) -> Value {
        Value::Ref(Rc::new(RefCell::new(v)))
    }

    pub fn foreign(obj: impl Dynamic + 'static) -> Value {
        Value::Foreign(Rc::new(obj))
    }

    /// Cheap identity test: same scalar of the same kind, or the same
    /// shared allocation. Never panics and never inspects container
    /// contents, so it is safe on kinds that lack native equality.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            (Value::Tuple(a), Value::Tuple(b)) => Rc::ptr_eq(a, b),
            (Value::Fn(a), Value::Fn(b)) => Rc::ptr_eq(a, b),
            (Value::Ref(a), Value::Ref(b)) => Rc::ptr_eq(a, b),
            (Value::Foreign(a), Value::Foreign(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Structural equality for assertions and container membership. The
// dispatching operation with override hooks lives in `crate::cmp`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Fn(a), Value::Fn(b)) => Rc::ptr_eq(a, b),
            (Value::Ref(a), Value::Ref(b)) => Rc::ptr_eq(a, b),
            (Value::Foreign(a), Value::Foreign(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{n:.1}")
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(values")?;
                for item in items.iter() {
                    write!(f, " {item}")?;
                }
                write!(f, ")")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{k} {v}")?;
                }
                write!(f, "}}")
            }
            Value::Record(rec) => {
                with_resolved(rec.type_tag, |tag| write!(f, "#<{tag}"))?;
                for (name, v) in &rec.fields {
                    with_resolved(*name, |n| write!(f, " {n} {v}"))?;
                }
                write!(f, ">")
            }
            Value::Fn(native) => write!(f, "#<fn {}>", native.name),
            Value::Ref(cell) => write!(f, "#<ref {}>", cell.borrow()),
            Value::Foreign(obj) => write!(f, "#<{}>", obj.type_name()),
        }
    }
}
