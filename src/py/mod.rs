use pyo3::prelude::*;

mod transformer;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<transformer::PyTransformer>()?;
    m.add_function(wrap_pyfunction!(hello, m)?)?;
    Ok(())
}

/// Smoke-test function to verify the extension loads.
#[pyfunction]
fn hello() -> String {
    "Hello from rdnaptrans!".to_string()
}
