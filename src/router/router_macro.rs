/// Builds a [`Router`](crate::Router) from `"METHODS" "target" => data` entries.
///
/// ```
/// use routemap::route_map;
///
/// let router = route_map! {
///     "GET" "/cats" => 1,
///     "GET,PUT,DELETE" "/cats/{id}" => 2,
///     "*" "/static/*" => 3,
/// };
/// assert_eq!(router.len(), 3);
/// ```
#[macro_export]
macro_rules! route_map {
    {$($methods:literal $target:expr => $data:expr),+ $(,)?} => {{
        let mut __router = $crate::Router::new();
        $(__router.insert($methods, $target, $data);)+
        __router
    }};
}
