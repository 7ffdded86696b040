mod bmp280_calib;
mod bmp280_core;
pub mod bmp280_decode;
mod bmp280_enums;
mod bmp280_error;
mod bmp280_shared;

pub use bmp280_calib::{CalibData, DataRaw, Reading, TFine};
pub use bmp280_core::BMP280;
pub use bmp280_enums::{Bmp280DeviceAddress, Bmp280OverSampling, Bmp280SensorMode, Bmp280Settings};
pub use bmp280_error::Bmp280Error;
pub use bmp280_shared::SharedBMP280;
