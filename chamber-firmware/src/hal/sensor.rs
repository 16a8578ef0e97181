// SHT31 Sensor - SensorProbe Implementation über I2C
//
// Dünner Wrapper um das Single-Shot-Protokoll des Sensors:
// Mess-Kommando schicken, Wandlungszeit abwarten, 6 Bytes lesen,
// CRC prüfen, Rohwerte umrechnen. Kein interner Zustandsautomat.

use chamber_core::{SensorError, SensorProbe, SensorReading};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{SHT31_ADDRESS, SHT31_MEASURE_DELAY_MS};

/// Single-Shot-Messung, High Repeatability, kein Clock-Stretching
const CMD_MEASURE: [u8; 2] = [0x24, 0x00];

/// SHT31 Temperatur-/Feuchte-Sensor
pub struct Sht31<I, D> {
    i2c: I,
    delay: D,
    address: u8,
}

impl<I, D> Sht31<I, D>
where
    I: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: SHT31_ADDRESS,
        }
    }
}

impl<I, D> SensorProbe for Sht31<I, D>
where
    I: I2c,
    D: DelayNs,
{
    fn read(&mut self) -> Result<SensorReading, SensorError> {
        self.i2c
            .write(self.address, &CMD_MEASURE)
            .map_err(|_| SensorError::Bus)?;

        // Wandlungszeit laut Datenblatt abwarten
        self.delay.delay_ms(SHT31_MEASURE_DELAY_MS);

        // Antwort: [temp_hi, temp_lo, crc, hum_hi, hum_lo, crc]
        let mut response = [0u8; 6];
        self.i2c
            .read(self.address, &mut response)
            .map_err(|_| SensorError::Bus)?;

        if crc8(&response[0..2]) != response[2] || crc8(&response[3..5]) != response[5] {
            return Err(SensorError::Crc);
        }

        let raw_temp = u16::from_be_bytes([response[0], response[1]]);
        let raw_hum = u16::from_be_bytes([response[3], response[4]]);

        // Umrechnung laut Datenblatt (16-bit Rohwert auf Messbereich)
        Ok(SensorReading {
            temperature_c: -45.0 + 175.0 * (raw_temp as f32) / 65535.0,
            humidity_pct: 100.0 * (raw_hum as f32) / 65535.0,
        })
    }
}

/// CRC-8 des SHT31: Polynom 0x31, Init 0xFF
fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0xFFu8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}
