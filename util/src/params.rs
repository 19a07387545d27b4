//! Generic parameters functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use thiserror::Error;
use toml;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The software root environment variable ({}) is not set", crate::host::SW_ROOT_ENV_VAR)]
    SwRootNotSet,

    #[error("Cannot load the parmeter file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the parameter file: {0}")]
    DeserialiseError(toml::de::Error)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// The file path is relative to the `$TRACK_SW_ROOT/params` directory
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError> 
where
    P: DeserializeOwned
{
    // Get the params dir
    let mut path = crate::host::get_sw_root()
        .map_err(|_| LoadError::SwRootNotSet)?;
    path.push("params");
    path.push(param_file_path);

    // Load the file into a string
    let params_str = read_to_string(path).map_err(LoadError::FileLoadError)?;

    parse(&params_str)
}

/// Parse parameters from a TOML string.
pub fn parse<P>(params_str: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned
{
    toml::from_str(params_str).map_err(LoadError::DeserialiseError)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Example {
        rate_hz: f64,
        name: String
    }

    #[test]
    fn test_parse() {
        let p: Example = parse("rate_hz = 10.0\nname = \"tracker\"").unwrap();
        assert_eq!(p, Example { rate_hz: 10.0, name: String::from("tracker") });

        match parse::<Example>("rate_hz = \"fast\"") {
            Err(LoadError::DeserialiseError(_)) => (),
            r => panic!("Expected deserialise error, got {:?}", r)
        }
    }

    #[test]
    fn test_load_without_sw_root() {
        std::env::remove_var(crate::host::SW_ROOT_ENV_VAR);

        match load::<Example>("path_tracker.toml") {
            Err(LoadError::SwRootNotSet) => (),
            r => panic!("Expected SwRootNotSet, got {:?}", r)
        }
    }
}
