// src/models.rs

//! Captured calls and their arguments.

use crate::constants::{CURSOR_SNAPSHOT_LIMIT, ELLIPSIS, NULL_LITERAL, SEPARATOR};
use crate::core::loggable::Loggable;
use crate::core::type_names::simple_type_name;
use chrono::NaiveDateTime;
use std::fmt::{self, Debug, Display};

// --- ARGUMENT MODEL ---
// Every argument is classified once, when it is captured, into one of these
// renderable kinds. The formatter only ever matches on this enum.

/// A captured call argument.
///
/// Containers are captured bounded: at most `CURSOR_SNAPSHOT_LIMIT` elements
/// are kept, and `has_more` records that the source held more.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// An absent value, rendered as `null`.
    Null,
    /// Text, rendered quoted at the top level.
    Text(String),
    /// A single character, rendered bare.
    Char(char),
    /// Decimal textual form of any integer or float.
    Number(String),
    /// `true` or `false`.
    Bool(bool),
    /// A constant of an enumeration, rendered as `Type.CONSTANT`.
    Enum {
        /// Simple name of the enumeration type.
        type_name: String,
        /// Name of the constant.
        constant: String,
    },
    /// A point in time, rendered as `Type{yyyy/MM/dd[ HH:mm:ss.SSS]}`.
    Instant {
        /// Simple name of the instant's type.
        type_name: String,
        /// Wall-clock value to render.
        value: NaiveDateTime,
    },
    /// Fixed-size array or slice; elements keep their own kinds.
    Array {
        /// Simple name of the element type.
        element_type: String,
        /// Captured elements, in order.
        elements: Vec<ArgValue>,
        /// The source held elements beyond those captured.
        has_more: bool,
    },
    /// Collection or cursor-style iterator.
    Iterable {
        /// Simple name of the collection type.
        type_name: String,
        /// Captured elements, in iteration order.
        elements: Vec<ArgValue>,
        /// The source held elements beyond those captured.
        has_more: bool,
    },
    /// Key/value mapping.
    Map {
        /// Simple name of the map type.
        type_name: String,
        /// Captured entries, in iteration order.
        entries: Vec<(ArgValue, ArgValue)>,
        /// The source held entries beyond those captured.
        has_more: bool,
    },
    /// Anything else, rendered as `(Type){repr}`.
    Opaque {
        /// Simple name of the value's type.
        type_name: String,
        /// Default textual representation of the value.
        repr: String,
    },
}

/// Converts at most `CURSOR_SNAPSHOT_LIMIT` items, then looks one item ahead
/// to learn whether the source had more.
pub(crate) fn snapshot<I, R, F>(mut items: I, convert: F) -> (Vec<R>, bool)
where
    I: Iterator,
    F: FnMut(I::Item) -> R,
{
    let captured: Vec<R> = items
        .by_ref()
        .take(CURSOR_SNAPSHOT_LIMIT)
        .map(convert)
        .collect();
    let has_more = items.next().is_some();
    (captured, has_more)
}

impl ArgValue {
    /// Text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Number from anything whose `Display` is its decimal form.
    pub fn number(value: impl Display) -> Self {
        Self::Number(value.to_string())
    }

    /// Enumeration constant `type_name.constant`.
    pub fn enumerated(type_name: impl Into<String>, constant: impl Into<String>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            constant: constant.into(),
        }
    }

    /// Instant labelled with the given type name.
    pub fn instant(type_name: impl Into<String>, value: NaiveDateTime) -> Self {
        Self::Instant {
            type_name: type_name.into(),
            value,
        }
    }

    /// Captures any value through its `Debug` text, labelled with its simple type name.
    pub fn opaque<T: Debug + ?Sized>(value: &T) -> Self {
        Self::Opaque {
            type_name: simple_type_name::<T>(),
            repr: format!("{:?}", value),
        }
    }

    /// Same as [`ArgValue::opaque`] but uses the `Display` text.
    pub fn opaque_display<T: Display + ?Sized>(value: &T) -> Self {
        Self::Opaque {
            type_name: simple_type_name::<T>(),
            repr: value.to_string(),
        }
    }

    /// Snapshots a cursor-style iterator. The iterator is consumed up to
    /// `CURSOR_SNAPSHOT_LIMIT` elements, plus one look-ahead to learn whether more remain.
    pub fn cursor<I>(iter: I) -> Self
    where
        I: Iterator,
        I::Item: Loggable,
    {
        let type_name = simple_type_name::<I>();
        let (elements, has_more) = snapshot(iter, |item| item.to_arg());
        Self::Iterable {
            type_name,
            elements,
            has_more,
        }
    }

    /// The value's default textual representation, used for elements nested
    /// inside collections and maps. Never quoted and never capped; a container
    /// captured partially ends with an ellipsis.
    pub fn plain(&self) -> String {
        self.to_string()
    }

    /// Arrays, collections and maps.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Array { .. } | Self::Iterable { .. } | Self::Map { .. }
        )
    }
}

impl Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str(NULL_LITERAL),
            Self::Text(s) => f.write_str(s),
            Self::Char(c) => write!(f, "{}", c),
            Self::Number(n) => f.write_str(n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Enum { constant, .. } => f.write_str(constant),
            Self::Instant { value, .. } => write!(f, "{}", value),
            Self::Array {
                elements, has_more, ..
            }
            | Self::Iterable {
                elements, has_more, ..
            } => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(SEPARATOR)?;
                    }
                    write!(f, "{}", element)?;
                }
                if *has_more {
                    write!(f, "{}", ELLIPSIS)?;
                }
                f.write_str("]")
            }
            Self::Map {
                entries, has_more, ..
            } => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(SEPARATOR)?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                if *has_more {
                    write!(f, "{}", ELLIPSIS)?;
                }
                f.write_str("}")
            }
            Self::Opaque { repr, .. } => f.write_str(repr),
        }
    }
}

// --- CALL DESCRIPTOR ---

/// One intercepted invocation: receiver type, method name and ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    receiver_type: String,
    method: String,
    args: Vec<ArgValue>,
}

impl CallDescriptor {
    /// Descriptor with an explicit receiver type name and no arguments.
    pub fn new(receiver_type: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            receiver_type: receiver_type.into(),
            method: method.into(),
            args: Vec::new(),
        }
    }

    /// Descriptor for a method of `T`, using the simple name of `T` as receiver type.
    pub fn of<T: ?Sized>(method: impl Into<String>) -> Self {
        Self::new(simple_type_name::<T>(), method)
    }

    /// Appends one argument, classified through its [`Loggable`] impl.
    pub fn arg<A: Loggable + ?Sized>(mut self, value: &A) -> Self {
        self.args.push(value.to_arg());
        self
    }

    /// Appends an already classified argument.
    pub fn arg_value(mut self, value: ArgValue) -> Self {
        self.args.push(value);
        self
    }

    /// Appends several classified arguments, keeping their order.
    pub fn with_args(mut self, args: impl IntoIterator<Item = ArgValue>) -> Self {
        self.args.extend(args);
        self
    }

    /// Simple name of the receiver type.
    pub fn receiver_type(&self) -> &str {
        &self.receiver_type
    }

    /// Name of the invoked method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Captured arguments, in call order.
    pub fn args(&self) -> &[ArgValue] {
        &self.args
    }

    /// `Receiver.method`, without arguments.
    pub fn declared_signature(&self) -> String {
        format!("{}.{}", self.receiver_type, self.method)
    }
}

/// Builds a [`CallDescriptor`] for a method of the given receiver type.
///
/// ```
/// use callprobe::call;
///
/// struct Inventory;
/// let call = call!(Inventory, "reserve", "sku-1", 3);
/// assert_eq!(call.declared_signature(), "Inventory.reserve");
/// assert_eq!(call.args().len(), 2);
/// ```
#[macro_export]
macro_rules! call {
    ($receiver:ty, $method:expr $(, $arg:expr)* $(,)?) => {
        $crate::models::CallDescriptor::of::<$receiver>($method)$(.arg(&$arg))*
    };
}
