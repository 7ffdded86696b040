use i2c_linux::I2c;
use log::debug;
use std::fs::File;
use std::path::Path;

use crate::i2cio::{self, RegisterBus};

use super::bmp280_calib::{
    CalibData, DataRaw, Reading,
    BMP280_LEN_CALIB_DATA, BMP280_LEN_CALIB_EXT1, BMP280_LEN_CALIB_EXT2, BMP280_LEN_DATA,
};
use super::bmp280_decode::unsigned_byte;
use super::bmp280_enums::*;
use super::bmp280_error::Bmp280Error;

// -- length of multi-byte registers
const BMP280_LEN_ID: usize = 2;

// -- registers
const BMP280_REG_ID: u8 = 0xd0;
const BMP280_REG_CONTROL: u8 = 0xf4;
#[allow(dead_code)]
const BMP280_REG_CONFIG: u8 = 0xf5;
const BMP280_REG_DATA: u8 = 0xf7;
const BMP280_REG_CALIB_DATA: u8 = 0x88;
const BMP280_REG_CALIB_EXT1: u8 = 0xa1;
const BMP280_REG_CALIB_EXT2: u8 = 0xe1;

pub struct BMP280<B = I2c<File>> {
    // -- register bus
    bus: B,
    // -- device address
    device_addr: Bmp280DeviceAddress,
    // -- ctrl_meas settings written before each reading
    settings: Bmp280Settings,
}

impl BMP280<I2c<File>> {

    /// Opens the i2c-dev bus at `i2c_bus_path` with default settings.
    pub fn new(i2c_bus_path: &Path, device_addr: Bmp280DeviceAddress) -> Result<Self, Bmp280Error> {
        let i2c = i2cio::get_bus(i2c_bus_path)?;
        debug!("Opened bus {} for device {device_addr}", i2c_bus_path.display());
        Ok(Self::with_bus(i2c, device_addr))
    }
}

impl<B: RegisterBus> BMP280<B> {

    pub fn with_bus(bus: B, device_addr: Bmp280DeviceAddress) -> Self {
        BMP280 {
            bus,
            device_addr,
            settings: Bmp280Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Bmp280Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn get_device_addr(&self) -> Bmp280DeviceAddress {
        self.device_addr.clone()
    }

    pub fn get_settings(&self) -> Bmp280Settings {
        self.settings
    }

    /// Gives back the bus.
    pub fn release(self) -> B {
        self.bus
    }

    fn read_block<const LEN: usize>(&mut self, register: u8) -> Result<[u8; LEN], Bmp280Error> {
        let mut reg_data: [u8; LEN] = [0; LEN];
        let bytes_read = self.bus.read_block(self.device_addr.value(), register, &mut reg_data)?;
        if bytes_read < LEN {
            return Err(Bmp280Error::ShortRead { register, expected: LEN, actual: bytes_read })
        }
        debug!("Read {bytes_read} bytes from register {register:#x}");
        Ok(reg_data)
    }

    /// Chip id and version as stored in the id register.
    pub fn read_chip_identity(&mut self) -> Result<(u8, u8), Bmp280Error> {
        let reg_data: [u8; BMP280_LEN_ID] = self.read_block(BMP280_REG_ID)?;
        let chip_id = unsigned_byte(&reg_data, 0);
        let chip_version = unsigned_byte(&reg_data, 1);
        debug!("Got chip id {chip_id:#x}, version {chip_version:#x}");
        Ok((chip_id, chip_version))
    }

    pub fn write_control(&mut self) -> Result<(), Bmp280Error> {
        let ctrl_meas = self.settings.control_byte();
        debug!("Setting register BMP280_REG_CONTROL {BMP280_REG_CONTROL:#x} to value {ctrl_meas:#010b} ({})", self.settings);
        self.bus.write_byte(self.device_addr.value(), BMP280_REG_CONTROL, ctrl_meas)?;
        Ok(())
    }

    pub fn read_calib_data(&mut self) -> Result<CalibData, Bmp280Error> {
        let cal1: [u8; BMP280_LEN_CALIB_DATA] = self.read_block(BMP280_REG_CALIB_DATA)?;
        let cal2: [u8; BMP280_LEN_CALIB_EXT1] = self.read_block(BMP280_REG_CALIB_EXT1)?;
        let cal3: [u8; BMP280_LEN_CALIB_EXT2] = self.read_block(BMP280_REG_CALIB_EXT2)?;
        let calib_data = CalibData::from_blocks(&cal1, &cal2, &cal3);
        debug!("Got calibration data: {calib_data:#?}");
        Ok(calib_data)
    }

    pub fn read_data_raw(&mut self) -> Result<DataRaw, Bmp280Error> {
        let reg_data: [u8; BMP280_LEN_DATA] = self.read_block(BMP280_REG_DATA)?;
        let data_raw = DataRaw::from_block(&reg_data);
        debug!("Got raw data: {data_raw:?}");
        Ok(data_raw)
    }

    /// Triggers a measurement and returns the compensated reading.
    ///
    /// Calibration is read again on every call, and the raw sample is compensated against that
    /// snapshot only.
    pub fn read_all(&mut self) -> Result<Reading, Bmp280Error> {
        self.write_control()?;
        let calib_data = self.read_calib_data()?;
        let data_raw = self.read_data_raw()?;
        Ok(calib_data.compensate(&data_raw))
    }
}
