use log::debug;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::i2cio::RegisterBus;

use super::bmp280_calib::Reading;
use super::bmp280_core::BMP280;
use super::bmp280_error::Bmp280Error;

/// Cloneable handle serializing access to one sensor.
///
/// The lock is held for a whole control write, calibration read and data read sequence, so
/// readings from different threads never interleave on the bus.
pub struct SharedBMP280<B> {
    inner: Arc<Mutex<BMP280<B>>>,
}

impl<B> Clone for SharedBMP280<B> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<B: RegisterBus> SharedBMP280<B> {

    pub fn new(bmp280: BMP280<B>) -> Self {
        Self { inner: Arc::new(Mutex::new(bmp280)) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BMP280<B>>, Bmp280Error> {
        self.inner.lock().map_err(|_| Bmp280Error::LockPoisoned)
    }

    pub fn read_chip_identity(&self) -> Result<(u8, u8), Bmp280Error> {
        self.lock()?.read_chip_identity()
    }

    pub fn read_all(&self) -> Result<Reading, Bmp280Error> {
        let mut bmp280 = self.lock()?;
        debug!("Acquired sensor {}", bmp280.get_device_addr());
        bmp280.read_all()
    }
}
