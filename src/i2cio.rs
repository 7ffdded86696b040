use i2c_linux::I2c;
use std::fs::File;
use std::path::Path;
use std::{thread, time};

/// Register level access to a device on a two-wire bus.
pub trait RegisterBus {
    /// Reads `data.len()` bytes starting at `register`, returns the number of bytes read.
    fn read_block(&mut self, device_addr: u16, register: u8, data: &mut [u8]) -> Result<usize, std::io::Error>;

    fn write_byte(&mut self, device_addr: u16, register: u8, value: u8) -> Result<(), std::io::Error>;
}

impl RegisterBus for I2c<File> {
    fn read_block(&mut self, device_addr: u16, register: u8, data: &mut [u8]) -> Result<usize, std::io::Error> {
        set_slave(self, device_addr)?;
        self.i2c_read_block_data(register, data)
    }

    fn write_byte(&mut self, device_addr: u16, register: u8, value: u8) -> Result<(), std::io::Error> {
        set_slave(self, device_addr)?;
        write_byte(self, register, value)
    }
}

pub fn get_bus(bus_path: &Path)  -> Result<I2c<File>, std::io::Error> {
    I2c::from_path(bus_path)
}

pub fn set_slave(i2c: &mut I2c<File>, dev_addr: u16) -> Result<(), std::io::Error> {
    i2c.smbus_set_slave_address(dev_addr, false)
}

pub fn write_byte(i2c: &mut I2c<File>, register: u8, data: u8) -> Result<(), std::io::Error> {
    i2c.smbus_write_byte_data(register, data)
}

pub fn delay(milli_secs: u32) {
    let delay = time::Duration::from_millis(milli_secs as u64);
    thread::sleep(delay);
}
