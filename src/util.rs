use {
    anyhow::Result,
    serde::{
        de::DeserializeOwned,
        Serialize,
    },
    std::{
        fs::{
            read_to_string,
            File,
        },
        io::Write,
        path::Path,
    },
};

/// Write `config` to `path` as pretty-printed RON.
pub fn write_config<C: Serialize>(
    config: &C,
    path: impl AsRef<Path>,
) -> Result<()> {
    File::create(path)?.write_all(
        ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())?.as_bytes(),
    )?;
    Ok(())
}

/// Read a RON config from `path`.
pub fn read_config<C: DeserializeOwned>(path: impl AsRef<Path>) -> Result<C> {
    Ok(ron::from_str(&read_to_string(path)?)?)
}
