use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiegeError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Seed cannot be 0")]
    InvalidSeed,

    #[error("The number of {side} cannot be greater than {max}", max = crate::engine::constants::MAX_SIDE_COMBATANTS)]
    TooManyCombatants { side: &'static str },

    #[error("Too many units")]
    TooManyUnits,

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SiegeError>;
