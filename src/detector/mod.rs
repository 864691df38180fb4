/// The `AND MONEDA = <code>` clause pattern and the detection entry point.
pub mod currency_filter;
