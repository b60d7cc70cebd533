/// Builds a [`ValueRecord`](crate::stmt::ValueRecord) from `key => value`
/// pairs, preserving the order in which they are written.
///
/// ```
/// let input = petrel_core::record! { "email" => "a@b.com", "age" => 30 };
/// assert_eq!(input.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::ValueRecord::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut record = $crate::stmt::ValueRecord::new();
        $(
            record.insert($key, $crate::stmt::Value::from($value));
        )+
        record
    }};
}
