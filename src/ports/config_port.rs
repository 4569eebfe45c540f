//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    /// Comma-separated list of floats, e.g. `initial_prices = 150, 250`.
    /// `None` when the key is missing or any element fails to parse.
    fn get_float_list(&self, section: &str, key: &str) -> Option<Vec<f64>>;
}
