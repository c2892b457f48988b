/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// `undefined` produces [`Value::Undefined`](crate::Value::Undefined), the absent
/// marker. Any other leaf expression goes through `Value::from`.
///
/// ```rust
/// use serde_flat::{nested, Value};
///
/// let value = nested!({
///     "name": "Alice",
///     "nickname": undefined,
///     "tags": ["a", "b"],
///     "meta": {}
/// });
/// assert!(value.is_object());
/// ```
#[macro_export]
macro_rules! nested {
    // Array elements are munched one at a time so that multi-token
    // expressions such as `-3` or `Some(x)` can appear as elements.
    (@array [$($elems:expr,)*]) => {
        vec![$($elems,)*]
    };

    (@array [$($elems:expr),*]) => {
        vec![$($elems),*]
    };

    (@array [$($elems:expr,)*] undefined $($rest:tt)*) => {
        $crate::nested!(@array [$($elems,)* $crate::nested!(undefined)] $($rest)*)
    };

    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::nested!(@array [$($elems,)* $crate::nested!(null)] $($rest)*)
    };

    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::nested!(@array [$($elems,)* $crate::nested!([$($array)*])] $($rest)*)
    };

    (@array [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::nested!(@array [$($elems,)* $crate::nested!({$($map)*})] $($rest)*)
    };

    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::nested!(@array [$($elems,)* $crate::nested!($next),] $($rest)*)
    };

    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::nested!(@array [$($elems,)* $crate::nested!($last)])
    };

    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::nested!(@array [$($elems,)*] $($rest)*)
    };

    // Object entries: collect key tokens up to `:`, then munch the value.
    (@object $object:ident () ()) => {};

    (@object $object:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        let _ = $object.insert(($($key)+).into(), $value);
        $crate::nested!(@object $object () ($($rest)*));
    };

    (@object $object:ident [$($key:tt)+] ($value:expr)) => {
        let _ = $object.insert(($($key)+).into(), $value);
    };

    (@object $object:ident ($($key:tt)+) (: undefined $($rest:tt)*)) => {
        $crate::nested!(@object $object [$($key)+] ($crate::nested!(undefined)) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: null $($rest:tt)*)) => {
        $crate::nested!(@object $object [$($key)+] ($crate::nested!(null)) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*)) => {
        $crate::nested!(@object $object [$($key)+] ($crate::nested!([$($array)*])) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: {$($map:tt)*} $($rest:tt)*)) => {
        $crate::nested!(@object $object [$($key)+] ($crate::nested!({$($map)*})) $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*)) => {
        $crate::nested!(@object $object [$($key)+] ($crate::nested!($value)) , $($rest)*);
    };

    (@object $object:ident ($($key:tt)+) (: $value:expr)) => {
        $crate::nested!(@object $object [$($key)+] ($crate::nested!($value)));
    };

    (@object $object:ident ($($key:tt)*) ($tt:tt $($rest:tt)*)) => {
        $crate::nested!(@object $object ($($key)* $tt) ($($rest)*));
    };

    (undefined) => {
        $crate::Value::Undefined
    };

    (null) => {
        $crate::Value::Null
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Value::Array($crate::nested!(@array [] $($tt)+))
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Value::Object({
            let mut object = $crate::Map::new();
            $crate::nested!(@object object () ($($tt)+));
            object
        })
    };

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_nested_macro_primitives() {
        assert_eq!(nested!(undefined), Value::Undefined);
        assert_eq!(nested!(null), Value::Null);
        assert_eq!(nested!(true), Value::Bool(true));
        assert_eq!(nested!(42), Value::Number(Number::Integer(42)));
        assert_eq!(nested!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(nested!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_nested_macro_objects_keep_order() {
        assert_eq!(nested!({}), Value::Object(Map::new()));

        let obj = nested!({
            "zeta": 1,
            "alpha": [true, null],
            "mid": { "inner": undefined }
        });

        let map = obj.as_object().unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            map.get("alpha"),
            Some(&Value::Array(vec![Value::Bool(true), Value::Null]))
        );
        assert_eq!(
            map.get("mid").and_then(Value::as_object).and_then(|m| m.get("inner")),
            Some(&Value::Undefined)
        );
    }
}
