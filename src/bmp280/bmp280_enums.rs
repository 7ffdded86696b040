use std::fmt;

// -- bit positions in ctrl_meas
const BMP280_CTRL_TEMP_POS: u8 = 0x05;
const BMP280_CTRL_PRESS_POS: u8 = 0x02;
const BMP280_CTRL_MODE_MSK: u8 = 0x03;
const BMP280_CTRL_OSR_MSK: u8 = 0x07;

#[derive(Clone, Debug, PartialEq)]
pub enum Bmp280DeviceAddress {
    Default,
    Secondary,
}

impl Default for Bmp280DeviceAddress {
    fn default() -> Self {
        Self::Default
    }
}

impl Bmp280DeviceAddress {
    const ADDR_DEFAULT: u16 = 0x76;
    const ADDR_SECONDARY: u16 = 0x77;

    pub fn value(&self) -> u16 {
        match *self {
            Self::Default => Self::ADDR_DEFAULT,
            Self::Secondary => Self::ADDR_SECONDARY,
        }
    }
}

impl fmt::Display for Bmp280DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Default => write!(f, "Default/{:#04x}", self.value()),
            Self::Secondary => write!(f, "Secondary/{:#04x}", self.value()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bmp280SensorMode {
    Sleep,
    Forced,
    Normal,
}

impl Bmp280SensorMode {
    const POWERMODE_SLEEP: u8 = 0x00;
    const POWERMODE_FORCED: u8 = 0x01;
    const POWERMODE_NORMAL: u8 = 0x03;

    pub fn value(&self) -> u8 {
        match *self {
            Self::Sleep => Self::POWERMODE_SLEEP,
            Self::Forced => Self::POWERMODE_FORCED,
            Self::Normal => Self::POWERMODE_NORMAL,
        }
    }
}

impl fmt::Display for Bmp280SensorMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Sleep => write!(f, "Sleep/{:#04x}", self.value()),
            Self::Forced => write!(f, "Forced/{:#04x}", self.value()),
            Self::Normal => write!(f, "Normal/{:#04x}", self.value()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bmp280OverSampling {
    Skipped,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl Bmp280OverSampling {
    const OVERSAMPLING_SKIPPED: u8 = 0x00;
    const OVERSAMPLING_1X: u8 = 0x01;
    const OVERSAMPLING_2X: u8 = 0x02;
    const OVERSAMPLING_4X: u8 = 0x03;
    const OVERSAMPLING_8X: u8 = 0x04;
    const OVERSAMPLING_16X: u8 = 0x05;

    pub fn value(&self) -> u8 {
        match *self {
            Self::Skipped => Self::OVERSAMPLING_SKIPPED,
            Self::X1 => Self::OVERSAMPLING_1X,
            Self::X2 => Self::OVERSAMPLING_2X,
            Self::X4 => Self::OVERSAMPLING_4X,
            Self::X8 => Self::OVERSAMPLING_8X,
            Self::X16 => Self::OVERSAMPLING_16X,
        }
    }
}

impl fmt::Display for Bmp280OverSampling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Skipped => write!(f, "Skipped/{:#04x}", self.value()),
            Self::X1 => write!(f, "X1/{:#04x}", self.value()),
            Self::X2 => write!(f, "X2/{:#04x}", self.value()),
            Self::X4 => write!(f, "X4/{:#04x}", self.value()),
            Self::X8 => write!(f, "X8/{:#04x}", self.value()),
            Self::X16 => write!(f, "X16/{:#04x}", self.value()),
        }
    }
}

/// Measurement settings written to ctrl_meas before every reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bmp280Settings {
    pub osr_t: Bmp280OverSampling,
    pub osr_p: Bmp280OverSampling,
    pub mode: Bmp280SensorMode,
}

impl Default for Bmp280Settings {
    fn default() -> Self {
        Self {
            osr_t: Bmp280OverSampling::X2,
            osr_p: Bmp280OverSampling::X2,
            mode: Bmp280SensorMode::Forced,
        }
    }
}

impl Bmp280Settings {
    pub fn control_byte(&self) -> u8 {
        ((self.osr_t.value() & BMP280_CTRL_OSR_MSK) << BMP280_CTRL_TEMP_POS)
            | ((self.osr_p.value() & BMP280_CTRL_OSR_MSK) << BMP280_CTRL_PRESS_POS)
            | (self.mode.value() & BMP280_CTRL_MODE_MSK)
    }
}

impl fmt::Display for Bmp280Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "osr_t: {}, osr_p: {}, mode: {}", self.osr_t, self.osr_p, self.mode)
    }
}
