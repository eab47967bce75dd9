// src/core/formatter.rs

//! Bounded, deterministic rendering of call signatures.

use crate::constants::{
    DATE_FORMAT, DATE_TIME_FORMAT, ELLIPSIS, MAX_MULTIPLES_LOG, NULL_LITERAL, SEPARATOR,
};
use crate::models::{ArgValue, CallDescriptor};
use chrono::{NaiveDateTime, Timelike};
use std::fmt::Write;

/// Renders calls as `Receiver.method(arg1, arg2, …)`.
///
/// Output is deterministic for a given descriptor and bounded: containers
/// show at most `element_cap` elements before an ellipsis.
#[derive(Debug, Clone, Copy)]
pub struct SignatureFormatter {
    element_cap: usize,
}

impl Default for SignatureFormatter {
    fn default() -> Self {
        Self::new(MAX_MULTIPLES_LOG)
    }
}

impl SignatureFormatter {
    /// Formatter rendering at most `element_cap` elements per container.
    pub fn new(element_cap: usize) -> Self {
        Self { element_cap }
    }

    /// Maximum number of elements rendered per container.
    pub fn element_cap(&self) -> usize {
        self.element_cap
    }

    /// Renders a captured call. Never fails, whatever the arguments hold.
    pub fn format(&self, call: &CallDescriptor) -> String {
        self.format_parts(call.receiver_type(), call.method(), call.args())
    }

    /// Renders `receiver_type.method(args)` from its parts.
    pub fn format_parts(&self, receiver_type: &str, method: &str, args: &[ArgValue]) -> String {
        let mut sign = String::with_capacity(receiver_type.len() + method.len() + args.len() * 16 + 3);
        sign.push_str(receiver_type);
        sign.push('.');
        sign.push_str(method);
        sign.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                sign.push_str(SEPARATOR);
            }
            self.append_value(&mut sign, arg);
        }
        sign.push(')');
        sign
    }

    fn append_value(&self, out: &mut String, value: &ArgValue) {
        match value {
            ArgValue::Null => out.push_str(NULL_LITERAL),
            // Quoted verbatim, no escaping.
            ArgValue::Text(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            ArgValue::Char(c) => out.push(*c),
            ArgValue::Number(n) => out.push_str(n),
            ArgValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            ArgValue::Enum {
                type_name,
                constant,
            } => {
                out.push_str(type_name);
                out.push('.');
                out.push_str(constant);
            }
            ArgValue::Instant { type_name, value } => {
                out.push_str(type_name);
                out.push('{');
                append_instant(out, value);
                out.push('}');
            }
            ArgValue::Array {
                element_type,
                elements,
                has_more,
            } => {
                let _ = write!(out, "({}[])", element_type);
                self.append_bounded(out, elements.iter(), *has_more, |out, element| {
                    if element.is_container() || matches!(element, ArgValue::Opaque { .. }) {
                        out.push_str(&element.plain());
                    } else {
                        self.append_value(out, element);
                    }
                });
            }
            ArgValue::Iterable {
                type_name,
                elements,
                has_more,
            } => {
                let _ = write!(out, "({})", type_name);
                self.append_bounded(out, elements.iter(), *has_more, |out, element| {
                    let _ = write!(out, "{}", element);
                });
            }
            ArgValue::Map {
                type_name,
                entries,
                has_more,
            } => {
                let _ = write!(out, "({})", type_name);
                self.append_bounded(out, entries.iter(), *has_more, |out, (key, value)| {
                    let _ = write!(out, "{}={}", key, value);
                });
            }
            ArgValue::Opaque { type_name, repr } => {
                let _ = write!(out, "({}){{{}}}", type_name, repr);
            }
        }
    }

    /// Writes `[e0, e1, …]`, stopping after `element_cap` items. The ellipsis
    /// replaces the trailing separator only when items were actually left out.
    fn append_bounded<I, F>(&self, out: &mut String, items: I, has_more: bool, mut render: F)
    where
        I: IntoIterator,
        F: FnMut(&mut String, I::Item),
    {
        let mut items = items.into_iter();
        out.push('[');
        let mut rendered = 0;
        while rendered < self.element_cap {
            let Some(item) = items.next() else { break };
            if rendered > 0 {
                out.push_str(SEPARATOR);
            }
            render(out, item);
            rendered += 1;
        }
        if has_more || items.next().is_some() {
            out.push(ELLIPSIS);
        }
        out.push(']');
    }
}

/// Date-only pattern when the time of day is exactly midnight (to the
/// millisecond), full date-time pattern otherwise. A real midnight instant is
/// indistinguishable from a date without time.
fn append_instant(out: &mut String, value: &NaiveDateTime) {
    let time = value.hour() + value.minute() + value.second() + value.nanosecond() / 1_000_000;
    let pattern = if time > 0 { DATE_TIME_FORMAT } else { DATE_FORMAT };
    let _ = write!(out, "{}", value.format(pattern));
}

/// Formats a call with the default element cap.
pub fn format_signature(receiver_type: &str, method: &str, args: &[ArgValue]) -> String {
    SignatureFormatter::default().format_parts(receiver_type, method, args)
}
