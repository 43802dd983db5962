//! The main binary crate for the application, which is just a thin wrapper around the project's library
//! crate.

use eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    gattlib_py_packaging::run_packaging()
}
