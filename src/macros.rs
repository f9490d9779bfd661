/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Object keys are stored without a leading `:`, the same way the parser stores them.
/// Any other expression goes through `Value::from`.
///
/// ```rust
/// use serde_sedf::{parse_value, sedf};
///
/// let built = sedf!({ "name": "Ada", "tags": [true, null, 3.5] });
/// let parsed = parse_value("(:name \"Ada\" :tags #(t nil 3.5))").unwrap();
/// assert_eq!(built, parsed);
/// ```
#[macro_export]
macro_rules! sedf {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::sedf!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::SedfMap::new())
    };

    // Duplicate keys are kept in order
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::SedfMap::new();
        $(
            object.push($key.to_string(), $crate::sedf!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
