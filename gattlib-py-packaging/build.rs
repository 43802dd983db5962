/// This build script uses [vergen](https://docs.rs/vergen/5/vergen/index.html) to pass Git & build
/// metadata for this tool to the compiler's environment variables.
///
/// Building from a source tarball (no `.git` directory) must still work, so Git metadata is dropped
/// rather than failing the build when it can't be gathered.
use anyhow::Result;
use vergen::{vergen, Config};

fn main() -> Result<()> {
    // Generate the default 'cargo:' instruction output
    let mut config = Config::default();
    *config.git_mut().semver_dirty_mut() = Some("-dirty");
    if let Err(err) = vergen(config) {
        println!("cargo:warning=Git build metadata unavailable: {}", err);

        let mut config = Config::default();
        *config.git_mut().enabled_mut() = false;
        vergen(config)?;
    }

    Ok(())
}
