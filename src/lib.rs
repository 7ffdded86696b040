pub mod bmp280;
pub mod i2cio;
