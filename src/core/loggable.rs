// src/core/loggable.rs

//! Conversion of Rust values into [`ArgValue`]s.
//!
//! The renderable kind of an argument is decided here, once, by the type
//! that implements [`Loggable`]. Types outside this module opt in with
//! [`loggable_enum!`](crate::loggable_enum) or
//! [`loggable_debug!`](crate::loggable_debug), or are passed as
//! [`ArgValue::opaque`].

use crate::core::type_names::simple_type_name;
use crate::models::{ArgValue, snapshot};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A value that can appear as an argument in a formatted call signature.
pub trait Loggable {
    /// Classifies the value into its renderable kind. Must not panic and must
    /// not consume more than `CURSOR_SNAPSHOT_LIMIT` elements of a container.
    fn to_arg(&self) -> ArgValue;
}

// --- Pointers and wrappers ---

impl<T: Loggable + ?Sized> Loggable for &T {
    fn to_arg(&self) -> ArgValue {
        (**self).to_arg()
    }
}

impl<T: Loggable + ?Sized> Loggable for &mut T {
    fn to_arg(&self) -> ArgValue {
        (**self).to_arg()
    }
}

impl<T: Loggable + ?Sized> Loggable for Box<T> {
    fn to_arg(&self) -> ArgValue {
        (**self).to_arg()
    }
}

impl<T: Loggable + ?Sized> Loggable for Rc<T> {
    fn to_arg(&self) -> ArgValue {
        (**self).to_arg()
    }
}

impl<T: Loggable + ?Sized> Loggable for Arc<T> {
    fn to_arg(&self) -> ArgValue {
        (**self).to_arg()
    }
}

impl<T: Loggable> Loggable for Option<T> {
    fn to_arg(&self) -> ArgValue {
        match self {
            Some(value) => value.to_arg(),
            None => ArgValue::Null,
        }
    }
}

impl Loggable for ArgValue {
    fn to_arg(&self) -> ArgValue {
        self.clone()
    }
}

// --- Scalars ---

impl Loggable for str {
    fn to_arg(&self) -> ArgValue {
        ArgValue::Text(self.to_string())
    }
}

impl Loggable for String {
    fn to_arg(&self) -> ArgValue {
        ArgValue::Text(self.clone())
    }
}

impl Loggable for Cow<'_, str> {
    fn to_arg(&self) -> ArgValue {
        ArgValue::Text(self.to_string())
    }
}

impl Loggable for char {
    fn to_arg(&self) -> ArgValue {
        ArgValue::Char(*self)
    }
}

impl Loggable for bool {
    fn to_arg(&self) -> ArgValue {
        ArgValue::Bool(*self)
    }
}

macro_rules! impl_loggable_number {
    ($($ty:ty),+) => {
        $(impl Loggable for $ty {
            fn to_arg(&self) -> ArgValue {
                ArgValue::number(self)
            }
        })+
    };
}

impl_loggable_number!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

// --- Instants ---

impl Loggable for NaiveDateTime {
    fn to_arg(&self) -> ArgValue {
        ArgValue::instant("NaiveDateTime", *self)
    }
}

impl Loggable for NaiveDate {
    fn to_arg(&self) -> ArgValue {
        ArgValue::instant("NaiveDate", self.and_time(NaiveTime::MIN))
    }
}

/// Rendered in the wall-clock time of its own zone.
impl<Tz: TimeZone> Loggable for DateTime<Tz> {
    fn to_arg(&self) -> ArgValue {
        ArgValue::instant("DateTime", self.naive_local())
    }
}

/// Rendered in the local zone of the process. Times chrono cannot represent
/// fall back to their `Debug` text.
impl Loggable for SystemTime {
    fn to_arg(&self) -> ArgValue {
        match system_time_to_utc(self) {
            Some(utc) => ArgValue::instant("SystemTime", utc.with_timezone(&Local).naive_local()),
            None => ArgValue::opaque(self),
        }
    }
}

fn system_time_to_utc(time: &SystemTime) -> Option<DateTime<Utc>> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => DateTime::from_timestamp(i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?.checked_neg()?;
            match before.subsec_nanos() {
                0 => DateTime::from_timestamp(secs, 0),
                nanos => DateTime::from_timestamp(secs.checked_sub(1)?, 1_000_000_000 - nanos),
            }
        }
    }
}

// --- Arrays ---

impl<T: Loggable> Loggable for [T] {
    fn to_arg(&self) -> ArgValue {
        let (elements, has_more) = snapshot(self.iter(), Loggable::to_arg);
        ArgValue::Array {
            element_type: simple_type_name::<T>(),
            elements,
            has_more,
        }
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn to_arg(&self) -> ArgValue {
        self.as_slice().to_arg()
    }
}

// --- Collections ---

fn iterable<'a, C, T>(items: impl Iterator<Item = &'a T>) -> ArgValue
where
    C: ?Sized,
    T: Loggable + 'a,
{
    let (elements, has_more) = snapshot(items, Loggable::to_arg);
    ArgValue::Iterable {
        type_name: simple_type_name::<C>(),
        elements,
        has_more,
    }
}

impl<T: Loggable> Loggable for Vec<T> {
    fn to_arg(&self) -> ArgValue {
        iterable::<Self, T>(self.iter())
    }
}

impl<T: Loggable> Loggable for VecDeque<T> {
    fn to_arg(&self) -> ArgValue {
        iterable::<Self, T>(self.iter())
    }
}

impl<T: Loggable> Loggable for LinkedList<T> {
    fn to_arg(&self) -> ArgValue {
        iterable::<Self, T>(self.iter())
    }
}

impl<T: Loggable, S> Loggable for HashSet<T, S> {
    fn to_arg(&self) -> ArgValue {
        iterable::<Self, T>(self.iter())
    }
}

impl<T: Loggable> Loggable for BTreeSet<T> {
    fn to_arg(&self) -> ArgValue {
        iterable::<Self, T>(self.iter())
    }
}

impl<T: Loggable> Loggable for BinaryHeap<T> {
    fn to_arg(&self) -> ArgValue {
        iterable::<Self, T>(self.iter())
    }
}

// --- Mappings ---

fn mapping<'a, M, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> ArgValue
where
    M: ?Sized,
    K: Loggable + 'a,
    V: Loggable + 'a,
{
    let (entries, has_more) = snapshot(entries, |(k, v)| (k.to_arg(), v.to_arg()));
    ArgValue::Map {
        type_name: simple_type_name::<M>(),
        entries,
        has_more,
    }
}

impl<K: Loggable, V: Loggable, S> Loggable for HashMap<K, V, S> {
    fn to_arg(&self) -> ArgValue {
        mapping::<Self, K, V>(self.iter())
    }
}

impl<K: Loggable, V: Loggable> Loggable for BTreeMap<K, V> {
    fn to_arg(&self) -> ArgValue {
        mapping::<Self, K, V>(self.iter())
    }
}

/// Implements [`Loggable`] for fieldless enums, rendering them as
/// `TypeName.Variant`.
///
/// ```
/// use callprobe::{loggable_enum, Loggable, ArgValue};
///
/// #[derive(Debug)]
/// enum Mode { Fast }
/// loggable_enum!(Mode);
///
/// assert_eq!(Mode::Fast.to_arg(), ArgValue::enumerated("Mode", "Fast"));
/// ```
#[macro_export]
macro_rules! loggable_enum {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::core::loggable::Loggable for $ty {
            fn to_arg(&self) -> $crate::models::ArgValue {
                $crate::models::ArgValue::enumerated(
                    $crate::core::type_names::simple_type_name::<$ty>(),
                    format!("{:?}", self),
                )
            }
        })+
    };
}

/// Implements [`Loggable`] for any `Debug` type, rendering it as an opaque
/// `(TypeName){debug text}` value.
#[macro_export]
macro_rules! loggable_debug {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::core::loggable::Loggable for $ty {
            fn to_arg(&self) -> $crate::models::ArgValue {
                $crate::models::ArgValue::opaque(self)
            }
        })+
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::constants::CURSOR_SNAPSHOT_LIMIT;
    use chrono::NaiveDate;
    use std::time::Duration;

    #[derive(Debug)]
    enum EnumTest {
        Key,
    }
    crate::loggable_enum!(EnumTest);

    #[derive(Debug)]
    #[allow(dead_code)]
    struct Color {
        r: u8,
        g: u8,
        b: u8,
    }
    crate::loggable_debug!(Color);

    #[test]
    fn test_scalars_pick_their_kind() {
        assert_eq!("p1".to_arg(), ArgValue::Text("p1".to_string()));
        assert_eq!(String::from("p1").to_arg(), ArgValue::Text("p1".to_string()));
        assert_eq!('p'.to_arg(), ArgValue::Char('p'));
        assert_eq!(true.to_arg(), ArgValue::Bool(true));
        assert_eq!(33u8.to_arg(), ArgValue::Number("33".to_string()));
        assert_eq!(2.1f64.to_arg(), ArgValue::Number("2.1".to_string()));
        assert_eq!(3.2f32.to_arg(), ArgValue::Number("3.2".to_string()));
        assert_eq!((-4i64).to_arg(), ArgValue::Number("-4".to_string()));
    }

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(None::<i32>.to_arg(), ArgValue::Null);
        assert_eq!(Some(5).to_arg(), ArgValue::Number("5".to_string()));
    }

    #[test]
    fn test_enum_and_opaque_macros() {
        assert_eq!(EnumTest::Key.to_arg(), ArgValue::enumerated("EnumTest", "Key"));
        assert_eq!(
            Color { r: 0, g: 0, b: 0 }.to_arg(),
            ArgValue::Opaque {
                type_name: "Color".to_string(),
                repr: "Color { r: 0, g: 0, b: 0 }".to_string(),
            }
        );
    }

    #[test]
    fn test_instants_keep_their_type_name() {
        let date = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        match date.to_arg() {
            ArgValue::Instant { type_name, value } => {
                assert_eq!(type_name, "NaiveDate");
                assert_eq!(value, date.and_hms_opt(0, 0, 0).unwrap());
            }
            other => panic!("unexpected kind: {:?}", other),
        }

        let utc = Utc.with_ymd_and_hms(2016, 1, 1, 16, 29, 55).unwrap();
        assert!(matches!(utc.to_arg(), ArgValue::Instant { type_name, .. } if type_name == "DateTime"));
    }

    #[test]
    fn test_arrays_and_collections() {
        assert_eq!(
            ["p1"].to_arg(),
            ArgValue::Array {
                element_type: "str".to_string(),
                elements: vec![ArgValue::Text("p1".to_string())],
                has_more: false,
            }
        );
        assert_eq!(
            vec![String::from("p2")].to_arg(),
            ArgValue::Iterable {
                type_name: "Vec".to_string(),
                elements: vec![ArgValue::Text("p2".to_string())],
                has_more: false,
            }
        );

        let mut map = HashMap::new();
        map.insert("key", "p3");
        assert_eq!(
            map.to_arg(),
            ArgValue::Map {
                type_name: "HashMap".to_string(),
                entries: vec![(
                    ArgValue::Text("key".to_string()),
                    ArgValue::Text("p3".to_string())
                )],
                has_more: false,
            }
        );
    }

    #[test]
    fn test_system_time_in_range_is_an_instant() {
        let before_epoch = UNIX_EPOCH - Duration::from_millis(1_500);
        let expected = DateTime::from_timestamp(-2, 500_000_000)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(before_epoch.to_arg(), ArgValue::instant("SystemTime", expected));

        let after_epoch = UNIX_EPOCH + Duration::from_secs(1_451_665_795);
        assert!(matches!(after_epoch.to_arg(), ArgValue::Instant { type_name, .. } if type_name == "SystemTime"));
    }

    #[test]
    fn test_system_time_out_of_range_is_opaque() {
        let far_future = UNIX_EPOCH + Duration::from_secs(100_000_000_000_000);
        match far_future.to_arg() {
            ArgValue::Opaque { type_name, repr } => {
                assert_eq!(type_name, "SystemTime");
                assert_eq!(repr, format!("{:?}", far_future));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_large_collections_are_captured_bounded() {
        let huge: Vec<u32> = (0..1_000_000).collect();
        match huge.to_arg() {
            ArgValue::Iterable {
                elements, has_more, ..
            } => {
                assert_eq!(elements.len(), CURSOR_SNAPSHOT_LIMIT);
                assert!(has_more);
            }
            other => panic!("unexpected kind: {:?}", other),
        }

        match huge.as_slice().to_arg() {
            ArgValue::Array {
                elements, has_more, ..
            } => {
                assert_eq!(elements.len(), CURSOR_SNAPSHOT_LIMIT);
                assert!(has_more);
            }
            other => panic!("unexpected kind: {:?}", other),
        }

        let map: BTreeMap<u32, u32> = (0..10_000).map(|i| (i, i)).collect();
        match map.to_arg() {
            ArgValue::Map {
                entries, has_more, ..
            } => {
                assert_eq!(entries.len(), CURSOR_SNAPSHOT_LIMIT);
                assert!(has_more);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_collection_at_snapshot_limit_has_nothing_more() {
        let exact: Vec<u32> = (0..256).collect();
        assert_eq!(exact.len(), CURSOR_SNAPSHOT_LIMIT);
        assert!(matches!(exact.to_arg(), ArgValue::Iterable { has_more: false, .. }));
    }
}
