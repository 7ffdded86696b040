use thiserror::Error;

#[derive(Debug, Error)]
pub enum Bmp280Error {
    /// The bus transaction failed (device not present, NACK, timeout, ...).
    #[error("I2C bus error: {0}")]
    Bus(#[from] std::io::Error),
    #[error("Short read from register {register:#04x}: expected {expected} bytes, got {actual}")]
    ShortRead {
        register: u8,
        expected: usize,
        actual: usize,
    },
    #[error("Sensor lock poisoned")]
    LockPoisoned,
}
