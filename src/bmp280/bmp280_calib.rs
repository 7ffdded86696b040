//! Factory calibration coefficients and the BMP280 compensation formulas.
//!
//! Temperature is compensated with the datasheet's fixed-point formula, pressure with the
//! double precision one. Both run on the same coefficient snapshot and the pressure formula
//! takes the `TFine` produced by the temperature formula for the same sample.

use log::debug;
use std::fmt;

use super::bmp280_decode::{signed16, unsigned16};

pub const BMP280_LEN_CALIB_DATA: usize = 24;
pub const BMP280_LEN_CALIB_EXT1: usize = 1;
pub const BMP280_LEN_CALIB_EXT2: usize = 7;
pub const BMP280_LEN_DATA: usize = 6;

// -- shift values
const BMP280_12_BIT_SHIFT: u8 = 12;
const BMP280_4_BIT_SHIFT: u8 = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CalibData {
    // -- Calibration coefficients for the temperature sensor
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    // -- Calibration coefficients for the pressure sensor
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

/// Un-compensated 20 bit ADC values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DataRaw {
    pub pressure: u32,
    pub temperature: u32,
}

/// Fine resolution temperature, only obtainable from `CalibData::compensate_temperature`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TFine(i32);

impl TFine {
    pub fn value(&self) -> i32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    // -- degrees Celsius
    pub temperature: f64,
    // -- hecto pascal
    pub pressure: f64,
}

impl From<Reading> for (f64, f64) {
    fn from(reading: Reading) -> Self {
        (reading.temperature, reading.pressure)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "temperature: {:.2} °C, pressure: {:.2} hPa", self.temperature, self.pressure)
    }
}

impl DataRaw {
    pub fn from_block(reg_data: &[u8; BMP280_LEN_DATA]) -> DataRaw {
        // -- pressure msb, lsb, xlsb
        let data_msb: u32 = (reg_data[0] as u32) << BMP280_12_BIT_SHIFT;
        let data_lsb: u32 = (reg_data[1] as u32) << BMP280_4_BIT_SHIFT;
        let data_xlsb: u32 = (reg_data[2] as u32) >> BMP280_4_BIT_SHIFT;
        let pressure = data_msb | data_lsb | data_xlsb;
        // -- temperature msb, lsb, xlsb
        let data_msb: u32 = (reg_data[3] as u32) << BMP280_12_BIT_SHIFT;
        let data_lsb: u32 = (reg_data[4] as u32) << BMP280_4_BIT_SHIFT;
        let data_xlsb: u32 = (reg_data[5] as u32) >> BMP280_4_BIT_SHIFT;
        let temperature = data_msb | data_lsb | data_xlsb;
        DataRaw { pressure, temperature }
    }
}

impl CalibData {

    /// Decodes the temperature and pressure coefficients from the block at 0x88.
    ///
    /// The two humidity blocks (0xA1 and 0xE1) carry no meaning for the BMP280 and are
    /// only logged.
    pub fn from_blocks(cal1: &[u8; BMP280_LEN_CALIB_DATA], cal2: &[u8; BMP280_LEN_CALIB_EXT1],
        cal3: &[u8; BMP280_LEN_CALIB_EXT2]) -> CalibData {
        let calib_data = CalibData {
            dig_t1: unsigned16(cal1, 0),
            dig_t2: signed16(cal1, 2),
            dig_t3: signed16(cal1, 4),
            dig_p1: unsigned16(cal1, 6),
            dig_p2: signed16(cal1, 8),
            dig_p3: signed16(cal1, 10),
            dig_p4: signed16(cal1, 12),
            dig_p5: signed16(cal1, 14),
            dig_p6: signed16(cal1, 16),
            dig_p7: signed16(cal1, 18),
            dig_p8: signed16(cal1, 20),
            dig_p9: signed16(cal1, 22),
        };
        debug!("Ignoring humidity calibration blocks {cal2:02x?} {cal3:02x?}");
        calib_data
    }

    pub fn compensate_temperature(&self, adc_t: u32) -> (TFine, f64) {
        let adc_t = adc_t as i64;
        let dig_t1 = self.dig_t1 as i64;
        let var1: i64 = (((adc_t >> 3) - (dig_t1 << 1)) * (self.dig_t2 as i64)) >> 11;
        let var2a: i64 = (adc_t >> 4) - dig_t1;
        let var2: i64 = (((var2a * var2a) >> 12) * (self.dig_t3 as i64)) >> 14;
        let t_fine = var1 + var2;
        let temperature = (t_fine * 5 + 128) >> 8;
        // -- |t_fine| stays below 2^23 for 20 bit samples and 16 bit coefficients
        (TFine(t_fine as i32), temperature as f64 / 100.0)
    }

    pub fn compensate_pressure(&self, adc_p: u32, t_fine: TFine) -> f64 {
        let var1 = (t_fine.0 as f64) / 2.0 - 64000.0;
        let var2 = var1 * var1 * (self.dig_p6 as f64) / 32768.0;
        let var2 = var2 + var1 * (self.dig_p5 as f64) * 2.0;
        let var2 = var2 / 4.0 + (self.dig_p4 as f64) * 65536.0;
        let var1 = ((self.dig_p3 as f64) * var1 * var1 / 524288.0 + (self.dig_p2 as f64) * var1) / 524288.0;
        let var1 = (1.0 + var1 / 32768.0) * (self.dig_p1 as f64);
        if var1 == 0.0 {
            // -- avoid division by zero, only reachable with dig_p1 == 0
            return 0.0
        }
        let pressure = 1048576.0 - (adc_p as f64);
        let pressure = (pressure - var2 / 4096.0) * 6250.0 / var1;
        let var1 = (self.dig_p9 as f64) * pressure * pressure / 2147483648.0;
        let var2 = pressure * (self.dig_p8 as f64) / 32768.0;
        let pressure = pressure + (var1 + var2 + (self.dig_p7 as f64)) / 16.0;
        pressure / 100.0
    }

    /// Temperature then pressure for one raw sample.
    pub fn compensate(&self, data_raw: &DataRaw) -> Reading {
        let (t_fine, temperature) = self.compensate_temperature(data_raw.temperature);
        let pressure = self.compensate_pressure(data_raw.pressure, t_fine);
        debug!("Compensated {data_raw:?} with t_fine {} to {temperature} °C, {pressure} hPa", t_fine.value());
        Reading { temperature, pressure }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -- datasheet example coefficients, little-endian as stored at 0x88
    pub(crate) const DATASHEET_CALIB: [u8; BMP280_LEN_CALIB_DATA] = [
        0x70, 0x6b, 0x43, 0x67, 0x18, 0xfc, 0x7d, 0x8e, 0x43, 0xd6, 0xd0, 0x0b,
        0x27, 0x0b, 0x8c, 0x00, 0xf9, 0xff, 0x8c, 0x3c, 0xf8, 0xc6, 0x70, 0x17,
    ];
    // -- adc_P = 415148, adc_T = 519888
    pub(crate) const DATASHEET_DATA: [u8; BMP280_LEN_DATA] = [0x65, 0x5a, 0xc0, 0x7e, 0xed, 0x00];

    fn datasheet_calib() -> CalibData {
        CalibData::from_blocks(&DATASHEET_CALIB, &[0; BMP280_LEN_CALIB_EXT1], &[0; BMP280_LEN_CALIB_EXT2])
    }

    #[test]
    fn decodes_calibration_offsets() {
        let calib = datasheet_calib();
        assert_eq!(calib, CalibData {
            dig_t1: 27504, dig_t2: 26435, dig_t3: -1000,
            dig_p1: 36477, dig_p2: -10685, dig_p3: 3024, dig_p4: 2855, dig_p5: 140,
            dig_p6: -7, dig_p7: 15500, dig_p8: -14600, dig_p9: 6000,
        });
    }

    #[test]
    fn humidity_blocks_do_not_affect_coefficients() {
        let with_humidity = CalibData::from_blocks(&DATASHEET_CALIB, &[0x4b], &[0x6a, 0x01, 0x00, 0x13, 0x2e, 0x03, 0x1e]);
        assert_eq!(with_humidity, datasheet_calib());
    }

    #[test]
    fn extracts_20_bit_samples() {
        let raw = DataRaw::from_block(&[0x80, 0x00, 0x00, 0x80, 0x00, 0x00]);
        assert_eq!(raw.pressure, 0x80000);
        assert_eq!(raw.temperature, 524288);

        let raw = DataRaw::from_block(&DATASHEET_DATA);
        assert_eq!(raw, DataRaw { pressure: 415148, temperature: 519888 });

        let raw = DataRaw::from_block(&[0xff; BMP280_LEN_DATA]);
        assert_eq!(raw.pressure, 0xfffff);
        assert_eq!(raw.temperature, 0xfffff);
    }

    #[test]
    fn datasheet_temperature() {
        let (t_fine, temperature) = datasheet_calib().compensate_temperature(519888);
        assert_eq!(t_fine.value(), 128422);
        assert_abs_diff_eq!(temperature, 25.08, epsilon = 1e-3);
    }

    #[test]
    fn negative_temperature_rounds_toward_negative_infinity() {
        let (t_fine, temperature) = datasheet_calib().compensate_temperature(300000);
        assert_eq!(t_fine.value(), -227131);
        assert_abs_diff_eq!(temperature, -44.36, epsilon = 1e-9);
    }

    #[test]
    fn extreme_inputs_do_not_overflow() {
        let calib = CalibData { dig_t1: 0, dig_t2: i16::MAX, dig_t3: i16::MAX, ..datasheet_calib() };
        let (t_fine, temperature) = calib.compensate_temperature(0xfffff);
        assert_eq!(t_fine.value(), 4194096);
        assert_abs_diff_eq!(temperature, 819.16, epsilon = 1e-9);

        let calib = CalibData { dig_t1: u16::MAX, dig_t2: i16::MIN, dig_t3: i16::MIN, ..datasheet_calib() };
        let (t_fine, _) = calib.compensate_temperature(0);
        assert_eq!(t_fine.value(), 32);
    }

    #[test]
    fn datasheet_pressure() {
        let calib = datasheet_calib();
        let (t_fine, _) = calib.compensate_temperature(519888);
        let pressure = calib.compensate_pressure(415148, t_fine);
        assert_abs_diff_eq!(pressure, 1006.5326, epsilon = 1e-2);
    }

    #[test]
    fn compensate_uses_t_fine_of_same_sample() {
        let calib = datasheet_calib();
        let reading = calib.compensate(&DataRaw::from_block(&DATASHEET_DATA));
        assert_abs_diff_eq!(reading.temperature, 25.08, epsilon = 1e-3);
        assert_abs_diff_eq!(reading.pressure, 1006.5326, epsilon = 1e-2);

        let cold = calib.compensate(&DataRaw { pressure: 415148, temperature: 300000 });
        assert_abs_diff_eq!(cold.temperature, -44.36, epsilon = 1e-3);
        assert_abs_diff_eq!(cold.pressure, 902.3831, epsilon = 1e-2);
    }

    #[test]
    fn zero_p1_reports_zero_pressure() {
        let calib = CalibData { dig_p1: 0, ..datasheet_calib() };
        let reading = calib.compensate(&DataRaw::from_block(&DATASHEET_DATA));
        assert_eq!(reading.pressure, 0.0);
        assert_abs_diff_eq!(reading.temperature, 25.08, epsilon = 1e-3);

        let reading = calib.compensate(&DataRaw { pressure: 0xfffff, temperature: 0 });
        assert_eq!(reading.pressure, 0.0);
    }

    #[test]
    fn reading_converts_to_pair() {
        let (temperature, pressure): (f64, f64) = Reading { temperature: 21.5, pressure: 1013.25 }.into();
        assert_eq!((temperature, pressure), (21.5, 1013.25));
        assert_eq!(Reading { temperature: 21.5, pressure: 1013.25 }.to_string(),
            "temperature: 21.50 °C, pressure: 1013.25 hPa");
    }
}
