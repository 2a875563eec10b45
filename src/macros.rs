/// Builds a `Gazetteer` from `(name, [ids...])` pairs
#[macro_export]
macro_rules! gazetteer {
    ($(($name:expr, [$($id:expr),* $(,)?])),* $(,)?) => {{
        let mut gazetteer = $crate::Gazetteer::default();
        $(
            gazetteer.add_all($name, vec![$($id as $crate::LocationId),*]);
        )*
        gazetteer
    }}
}
