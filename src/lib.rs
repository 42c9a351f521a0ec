//! # MAX31856 Driver
//!
//! This is a driver for the register file of the Maxim MAX31856 thermocouple
//! to digital converter.
//!
//! Specifically, this driver models the chip's sixteen registers (addresses
//! `0x00` to `0x0F`) and the fixed-point arithmetic that turns register
//! contents into temperatures in °C - it does not own the SPI bus, decide
//! when conversions are triggered, or format reports.
//!
//! The MAX31856 register file contains:
//!
//! * Two configuration registers (conversion mode, one-shot trigger,
//!   open-circuit detection, cold-junction sensor control, fault handling,
//!   mains notch filter, thermocouple type, sample averaging)
//! * A fault mask register
//! * Cold-junction and linearized-temperature fault thresholds
//! * A cold-junction temperature offset
//! * The measured cold-junction and linearized thermocouple temperatures
//! * A fault status register
//!
//! The [`RegisterImage`] object holds a local copy of all sixteen registers.
//! The whole image moves over the bus in fixed bursts: one 17-byte
//! full-duplex read covering every register, and one 13-byte write covering
//! the twelve writable ones. The chip expects SPI mode 1 (CPOL = 0,
//! CPHA = 1), MSB first, at up to 5 MHz.
//!
//! # Example
//!
//! You might configure and read a MAX31856 like this:
//!
//! ```rust
//! # struct Spi;
//! # impl embedded_hal::spi::ErrorType for Spi {
//! #     type Error = core::convert::Infallible;
//! # }
//! # impl embedded_hal::spi::SpiDevice for Spi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [embedded_hal::spi::Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let mut spi = Spi;
//! let mut image = max31856::RegisterImage::new();
//! image.set_continuous_conversion(true);
//! image.set_open_circuit_mode(max31856::OpenCircuitMode::RsBelow5k);
//! image.set_thermocouple_type(max31856::ThermocoupleType::K);
//! image.set_averaging(max31856::SampleAveraging::Sixteen);
//! image.set_fault_masked(max31856::FaultSource::OpenCircuit, false);
//! if let Err(e) = image.write_to(&mut spi) {
//!     // chip didn't respond
//! }
//! match max31856::RegisterImage::read_from(&mut spi) {
//!     Ok(image) => {
//!         let temperatures = image.measurements();
//!         let _ = temperatures.thermocouple;
//!     }
//!     Err(e) => {
//!         // bus fault
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]

use embedded_hal::spi::SpiDevice;

//
// Public Types
//

/// Errors reported by the register image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A read burst was not exactly [`READ_BURST_LEN`] bytes long.
    BurstLength {
        /// Length of the rejected buffer.
        len: usize,
    },
    /// A field was given a value that does not fit its bit width.
    FieldRange {
        /// The rejected value.
        value: u8,
        /// Width of the field in bits.
        width: u8,
    },
}

/// Thermocouple type, selected in the low nibble of CR1.
///
/// Selector values 8 to 11 and 12 to 15 put the chip in voltage input mode
/// instead of thermocouple linearization.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThermocoupleType {
    /// Type B thermocouple
    B = 0,
    /// Type E thermocouple
    E = 1,
    /// Type J thermocouple
    J = 2,
    /// Type K thermocouple (factory default)
    K = 3,
    /// Type N thermocouple
    N = 4,
    /// Type R thermocouple
    R = 5,
    /// Type S thermocouple
    S = 6,
    /// Type T thermocouple
    T = 7,
    /// Voltage input, gain of 8, no linearization
    VoltageGain8 = 8,
    /// Voltage input, gain of 32, no linearization
    VoltageGain32 = 12,
}

/// Number of samples averaged per conversion, selected in CR1 bits 6:4.
///
/// Selector values 4 to 7 all mean sixteen samples.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleAveraging {
    /// Averaging disabled, one sample per conversion (factory default)
    Single = 0,
    /// Two samples averaged
    Two = 1,
    /// Four samples averaged
    Four = 2,
    /// Eight samples averaged
    Eight = 3,
    /// Sixteen samples averaged
    Sixteen = 4,
}

/// Open-circuit fault detection mode, selected in CR0 bits 5:4.
///
/// The detection test injects a current into the thermocouple inputs, so
/// the right mode depends on the source resistance and the input filter
/// time constant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpenCircuitMode {
    /// Open-circuit detection disabled (factory default)
    Disabled = 0b00,
    /// Enabled, for source resistances below 5 kΩ
    RsBelow5k = 0b01,
    /// Enabled, source resistance 5 kΩ to 40 kΩ, time constant under 2 ms
    TcBelow2ms = 0b10,
    /// Enabled, source resistance 5 kΩ to 40 kΩ, time constant over 2 ms
    TcAbove2ms = 0b11,
}

/// Mains notch filter selection, CR0 bit 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoiseFilter {
    /// Reject 60 Hz and its harmonics (factory default)
    Hz60 = 0,
    /// Reject 50 Hz and its harmonics
    Hz50 = 1,
}

/// Behaviour of the FAULT output and the fault status bits, CR0 bit 2.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultMode {
    /// Faults assert and deassert with the fault condition (factory default)
    Comparator = 0,
    /// Faults latch until cleared with the fault-clear flag
    Interrupt = 1,
}

/// The six fault sources that can be masked in the MASK register.
///
/// A masked source never asserts the FAULT output. All six are masked at
/// power-on reset.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultSource {
    /// Thermocouple open-circuit fault
    OpenCircuit = 1 << 0,
    /// Over-voltage or under-voltage input fault
    OverUnderVoltage = 1 << 1,
    /// Thermocouple temperature below the low threshold
    ThermocoupleLow = 1 << 2,
    /// Thermocouple temperature above the high threshold
    ThermocoupleHigh = 1 << 3,
    /// Cold-junction temperature below the low threshold
    ColdJunctionLow = 1 << 4,
    /// Cold-junction temperature above the high threshold
    ColdJunctionHigh = 1 << 5,
}

/// Decoded contents of the fault status register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultStatus {
    /// Cold-junction temperature outside the chip's operating range
    pub cj_range: bool,
    /// Thermocouple temperature outside the chip's operating range
    pub tc_range: bool,
    /// Cold-junction temperature above the high threshold
    pub cj_high: bool,
    /// Cold-junction temperature below the low threshold
    pub cj_low: bool,
    /// Thermocouple temperature above the high threshold
    pub tc_high: bool,
    /// Thermocouple temperature below the low threshold
    pub tc_low: bool,
    /// Input voltage negative or above VDD
    pub ovuv: bool,
    /// Open circuit detected on the thermocouple inputs
    pub open: bool,
}

/// Temperatures and thresholds scaled to °C, computed from a
/// [`RegisterImage`] snapshot.
///
/// This is a derived view: [`RegisterImage::measurements`] recomputes it in
/// full every time, and it is never the source of truth.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurements {
    /// Cold-junction high fault threshold
    pub cj_high_fault_threshold: f32,
    /// Cold-junction low fault threshold
    pub cj_low_fault_threshold: f32,
    /// Linearized-temperature high fault threshold
    pub tc_high_fault_threshold: f32,
    /// Linearized-temperature low fault threshold
    pub tc_low_fault_threshold: f32,
    /// Cold-junction temperature offset
    pub cj_offset: f32,
    /// Measured cold-junction temperature
    pub cold_junction: f32,
    /// Measured linearized thermocouple temperature
    pub thermocouple: f32,
}

/// Estimated conversion time in milliseconds, derived from the conversion
/// mode, notch filter and sample averaging currently in the image.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConversionTime {
    /// Typical time for one conversion
    pub typical_ms: f32,
    /// Maximum time for one conversion
    pub max_ms: f32,
}

/// The set of registers in the MAX31856.
///
/// The discriminant is the register's read address; the matching write
/// address has bit 7 set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Configuration Register 0
    Cr0 = 0x00,
    /// Configuration Register 1
    Cr1 = 0x01,
    /// Fault Mask Register
    Mask = 0x02,
    /// Cold-Junction High Fault Threshold
    Cjhf = 0x03,
    /// Cold-Junction Low Fault Threshold
    Cjlf = 0x04,
    /// Linearized Temperature High Fault Threshold, high byte
    Lthfth = 0x05,
    /// Linearized Temperature High Fault Threshold, low byte
    Lthftl = 0x06,
    /// Linearized Temperature Low Fault Threshold, high byte
    Ltlfth = 0x07,
    /// Linearized Temperature Low Fault Threshold, low byte
    Ltlftl = 0x08,
    /// Cold-Junction Temperature Offset
    Cjto = 0x09,
    /// Cold-Junction Temperature, high byte
    Cjth = 0x0A,
    /// Cold-Junction Temperature, low byte
    Cjtl = 0x0B,
    /// Linearized Thermocouple Temperature, high byte
    Ltcbh = 0x0C,
    /// Linearized Thermocouple Temperature, middle byte
    Ltcbm = 0x0D,
    /// Linearized Thermocouple Temperature, low byte
    Ltcbl = 0x0E,
    /// Fault Status Register
    Sr = 0x0F,
}

/// A local copy of the MAX31856 register file.
///
/// One instance mirrors one physical chip. The image owns no bus and does
/// no I/O of its own; every operation on it completes in constant time
/// without allocating, so it is safe to use from interrupt context.
/// Multi-byte quantities are stored as their constituent bytes in wire
/// order, which keeps the encoding independent of host byte order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterImage {
    registers: [u8; NUM_REGISTERS],
}

//
// Private Types
//

// None

//
// Public Data
//

/// Length of the full-duplex read burst: one address-phase byte that comes
/// back as garbage, then all sixteen registers in address order.
pub const READ_BURST_LEN: usize = 17;

/// Length of the write burst: the write address byte `0x80`, then the
/// twelve writable registers in address order.
pub const WRITE_BURST_LEN: usize = 13;

//
// Private Data
//

const NUM_REGISTERS: usize = 16;
const NUM_WRITABLE_REGISTERS: usize = 12;

/// Register address 0 with bit 7 set to request a write.
const WRITE_ADDRESS: u8 = 0x80;

/// Power-on reset contents of the register file, in address order.
const FACTORY_DEFAULTS: [u8; NUM_REGISTERS] = [
    0x00, // CR0 - normally off, everything disabled, 60 Hz filter
    0x03, // CR1 - type K, no averaging
    0xFF, // MASK - all faults masked
    0x7F, // CJHF - +127 °C
    0xC0, // CJLF - -64 °C
    0x7F, 0xFF, // LTHFT - +2047.9375 °C
    0x80, 0x00, // LTLFT - -2048 °C
    0x00, // CJTO - no offset
    0x00, 0x00, // CJT
    0x00, 0x00, 0x00, // LTC
    0x00, // SR - no faults
];

//
// impls on Public Types
//

impl SampleAveraging {
    /// Number of samples averaged per conversion.
    pub fn samples(self) -> u8 {
        match self {
            SampleAveraging::Single => 1,
            SampleAveraging::Two => 2,
            SampleAveraging::Four => 4,
            SampleAveraging::Eight => 8,
            SampleAveraging::Sixteen => 16,
        }
    }
}

impl FaultStatus {
    /// Decode a raw fault status register byte.
    pub fn from_register(reg: u8) -> FaultStatus {
        const CJ_RANGE: u8 = 1 << 7;
        const TC_RANGE: u8 = 1 << 6;
        const CJ_HIGH: u8 = 1 << 5;
        const CJ_LOW: u8 = 1 << 4;
        const TC_HIGH: u8 = 1 << 3;
        const TC_LOW: u8 = 1 << 2;
        const OVUV: u8 = 1 << 1;
        const OPEN: u8 = 1 << 0;
        FaultStatus {
            cj_range: (reg & CJ_RANGE) != 0,
            tc_range: (reg & TC_RANGE) != 0,
            cj_high: (reg & CJ_HIGH) != 0,
            cj_low: (reg & CJ_LOW) != 0,
            tc_high: (reg & TC_HIGH) != 0,
            tc_low: (reg & TC_LOW) != 0,
            ovuv: (reg & OVUV) != 0,
            open: (reg & OPEN) != 0,
        }
    }

    /// Whether any fault bit is set.
    pub fn has_fault(&self) -> bool {
        self.cj_range
            || self.tc_range
            || self.cj_high
            || self.cj_low
            || self.tc_high
            || self.tc_low
            || self.ovuv
            || self.open
    }
}

impl RegisterImage {
    /// Create a new register image holding the chip's power-on reset
    /// values.
    ///
    /// This matches the contents of a freshly reset MAX31856, so an image
    /// that is never written stays consistent with untouched hardware.
    pub fn new() -> RegisterImage {
        RegisterImage {
            registers: FACTORY_DEFAULTS,
        }
    }

    /// Put every register back to its factory default value.
    ///
    /// Only the local copy changes; write the image to the chip to reset
    /// the hardware configuration as well.
    pub fn reset_to_defaults(&mut self) {
        self.registers = FACTORY_DEFAULTS;
    }

    /// Update bits in one of the registers
    fn set_register_bits(&mut self, register: Register, value: u8, mask: u8) {
        // Clear the bits we want to change
        self.registers[register as usize] &= !mask;
        // Set any bits as necessary, but only in the cleared section
        self.registers[register as usize] |= value & mask;
    }

    /// Read back bits from one of the registers
    fn get_register_bits(&self, register: Register, mask: u8) -> u8 {
        self.registers[register as usize] & mask
    }

    /// Read a register byte exactly as it would appear on the wire.
    pub fn register(&self, register: Register) -> u8 {
        self.registers[register as usize]
    }

    /// Overwrite a register byte.
    ///
    /// This is raw access for diagnostics and wire-level tooling: reserved
    /// bits are neither checked nor synthesized, and no field validation is
    /// applied. The typed accessors are the right tool for everything else.
    pub fn set_register(&mut self, register: Register, value: u8) {
        self.registers[register as usize] = value;
    }

    /// Set automatic conversion mode.
    ///
    /// When enabled, the chip converts continuously at the conversion rate.
    /// When disabled (the default), it idles until a one-shot conversion is
    /// requested.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_continuous_conversion(&mut self, enabled: bool) {
        const CMODE: u8 = 1 << 7;
        self.set_register_bits(Register::Cr0, if enabled { CMODE } else { 0 }, CMODE);
    }

    /// Get whether automatic conversion mode is selected.
    pub fn continuous_conversion(&self) -> bool {
        const CMODE: u8 = 1 << 7;
        self.get_register_bits(Register::Cr0, CMODE) != 0
    }

    /// Request a single conversion.
    ///
    /// Only meaningful when automatic conversion mode is off. The bit
    /// self-clears on the chip once the conversion completes.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_one_shot(&mut self, enabled: bool) {
        const ONESHOT: u8 = 1 << 6;
        self.set_register_bits(Register::Cr0, if enabled { ONESHOT } else { 0 }, ONESHOT);
    }

    /// Get whether a one-shot conversion is requested.
    pub fn one_shot(&self) -> bool {
        const ONESHOT: u8 = 1 << 6;
        self.get_register_bits(Register::Cr0, ONESHOT) != 0
    }

    /// Set the open-circuit fault detection mode.
    ///
    /// See [`OpenCircuitMode`] for how to pick a mode for your thermocouple
    /// wiring.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_open_circuit_mode(&mut self, mode: OpenCircuitMode) {
        const MASK: u8 = 0b11 << 4;
        self.set_register_bits(Register::Cr0, (mode as u8) << 4, MASK);
    }

    /// Set the open-circuit fault detection selector from its raw 2-bit
    /// value.
    ///
    /// Values above 3 do not fit the field and are rejected.
    pub fn set_open_circuit_mode_raw(&mut self, select: u8) -> Result<(), Error> {
        const MASK: u8 = 0b11 << 4;
        if select > 0b11 {
            return Err(Error::FieldRange {
                value: select,
                width: 2,
            });
        }
        self.set_register_bits(Register::Cr0, select << 4, MASK);
        Ok(())
    }

    /// Get the open-circuit fault detection mode.
    pub fn open_circuit_mode(&self) -> OpenCircuitMode {
        const MASK: u8 = 0b11 << 4;
        match self.get_register_bits(Register::Cr0, MASK) >> 4 {
            0b00 => OpenCircuitMode::Disabled,
            0b01 => OpenCircuitMode::RsBelow5k,
            0b10 => OpenCircuitMode::TcBelow2ms,
            _ => OpenCircuitMode::TcAbove2ms,
        }
    }

    /// Disable the internal cold-junction temperature sensor.
    ///
    /// With the sensor disabled, the cold-junction temperature registers
    /// become writable and an external reference temperature can be
    /// supplied through the image instead.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_cold_junction_disabled(&mut self, disabled: bool) {
        const CJ: u8 = 1 << 3;
        self.set_register_bits(Register::Cr0, if disabled { CJ } else { 0 }, CJ);
    }

    /// Get whether the internal cold-junction sensor is disabled.
    pub fn cold_junction_disabled(&self) -> bool {
        const CJ: u8 = 1 << 3;
        self.get_register_bits(Register::Cr0, CJ) != 0
    }

    /// Set how fault conditions behave.
    ///
    /// In [`FaultMode::Interrupt`], the FAULT output and the status bits
    /// latch until cleared with the fault-clear flag.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_fault_mode(&mut self, mode: FaultMode) {
        const FAULT: u8 = 1 << 2;
        self.set_register_bits(Register::Cr0, (mode as u8) << 2, FAULT);
    }

    /// Get how fault conditions behave.
    pub fn fault_mode(&self) -> FaultMode {
        const FAULT: u8 = 1 << 2;
        if self.get_register_bits(Register::Cr0, FAULT) == 0 {
            FaultMode::Comparator
        } else {
            FaultMode::Interrupt
        }
    }

    /// Set the fault-clear flag.
    ///
    /// Writing the flag to the chip clears latched faults in
    /// [`FaultMode::Interrupt`]; the bit then self-clears on the chip.
    /// [`RegisterImage::clear_faults`] drives the whole sequence over the
    /// bus.
    pub fn set_fault_clear(&mut self, enabled: bool) {
        const FAULTCLR: u8 = 1 << 1;
        self.set_register_bits(Register::Cr0, if enabled { FAULTCLR } else { 0 }, FAULTCLR);
    }

    /// Get whether the fault-clear flag is set in the image.
    pub fn fault_clear(&self) -> bool {
        const FAULTCLR: u8 = 1 << 1;
        self.get_register_bits(Register::Cr0, FAULTCLR) != 0
    }

    /// Select the mains notch filter.
    ///
    /// Pick the variant matching the local mains frequency.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_noise_filter(&mut self, filter: NoiseFilter) {
        const HZ50: u8 = 1 << 0;
        self.set_register_bits(Register::Cr0, filter as u8, HZ50);
    }

    /// Get the selected mains notch filter.
    pub fn noise_filter(&self) -> NoiseFilter {
        const HZ50: u8 = 1 << 0;
        if self.get_register_bits(Register::Cr0, HZ50) == 0 {
            NoiseFilter::Hz60
        } else {
            NoiseFilter::Hz50
        }
    }

    /// Set the thermocouple type.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_thermocouple_type(&mut self, tc_type: ThermocoupleType) {
        const MASK: u8 = 0b1111;
        self.set_register_bits(Register::Cr1, tc_type as u8, MASK);
    }

    /// Set the thermocouple type selector from its raw 4-bit value.
    ///
    /// All sixteen selector values are meaningful to the chip (8 to 15
    /// select the voltage input modes); values above 15 do not fit the
    /// field and are rejected.
    pub fn set_thermocouple_type_raw(&mut self, select: u8) -> Result<(), Error> {
        const MASK: u8 = 0b1111;
        if select > 0b1111 {
            return Err(Error::FieldRange {
                value: select,
                width: 4,
            });
        }
        self.set_register_bits(Register::Cr1, select, MASK);
        Ok(())
    }

    /// Get the selected thermocouple type.
    ///
    /// Raw selector values 8 to 11 read back as
    /// [`ThermocoupleType::VoltageGain8`] and 12 to 15 as
    /// [`ThermocoupleType::VoltageGain32`].
    pub fn thermocouple_type(&self) -> ThermocoupleType {
        const MASK: u8 = 0b1111;
        match self.get_register_bits(Register::Cr1, MASK) {
            0 => ThermocoupleType::B,
            1 => ThermocoupleType::E,
            2 => ThermocoupleType::J,
            3 => ThermocoupleType::K,
            4 => ThermocoupleType::N,
            5 => ThermocoupleType::R,
            6 => ThermocoupleType::S,
            7 => ThermocoupleType::T,
            8..=11 => ThermocoupleType::VoltageGain8,
            _ => ThermocoupleType::VoltageGain32,
        }
    }

    /// Set the number of samples averaged per conversion.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_averaging(&mut self, averaging: SampleAveraging) {
        const MASK: u8 = 0b111 << 4;
        self.set_register_bits(Register::Cr1, (averaging as u8) << 4, MASK);
    }

    /// Set the sample averaging selector from its raw 3-bit value.
    ///
    /// Selector values 4 to 7 all mean sixteen samples; values above 7 do
    /// not fit the field and are rejected.
    pub fn set_averaging_raw(&mut self, select: u8) -> Result<(), Error> {
        const MASK: u8 = 0b111 << 4;
        if select > 0b111 {
            return Err(Error::FieldRange {
                value: select,
                width: 3,
            });
        }
        self.set_register_bits(Register::Cr1, select << 4, MASK);
        Ok(())
    }

    /// Get the selected sample averaging.
    pub fn averaging(&self) -> SampleAveraging {
        const MASK: u8 = 0b111 << 4;
        match self.get_register_bits(Register::Cr1, MASK) >> 4 {
            0 => SampleAveraging::Single,
            1 => SampleAveraging::Two,
            2 => SampleAveraging::Four,
            3 => SampleAveraging::Eight,
            _ => SampleAveraging::Sixteen,
        }
    }

    /// Mask or unmask one fault source.
    ///
    /// A masked source never asserts the FAULT output. All six sources are
    /// masked at power-on reset, so unmask the ones you care about.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_fault_masked(&mut self, source: FaultSource, masked: bool) {
        self.set_register_bits(Register::Mask, if masked { 0xFF } else { 0 }, source as u8);
    }

    /// Get whether one fault source is masked.
    pub fn fault_masked(&self, source: FaultSource) -> bool {
        self.get_register_bits(Register::Mask, source as u8) != 0
    }

    /// Mask or unmask all six fault sources at once.
    ///
    /// The two reserved bits of the MASK register keep whatever value they
    /// had.
    pub fn set_all_faults_masked(&mut self, masked: bool) {
        const ALL_SOURCES: u8 = 0b0011_1111;
        self.set_register_bits(Register::Mask, if masked { 0xFF } else { 0 }, ALL_SOURCES);
    }

    /// Set the cold-junction high fault threshold in °C.
    ///
    /// The register resolution is 1 °C per LSB, so the signed byte is the
    /// threshold. Factory default is +127 °C.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_cj_high_fault_threshold(&mut self, celsius: i8) {
        self.set_register(Register::Cjhf, celsius as u8);
    }

    /// Get the cold-junction high fault threshold in °C.
    pub fn cj_high_fault_threshold(&self) -> i8 {
        self.register(Register::Cjhf) as i8
    }

    /// Set the cold-junction low fault threshold in °C.
    ///
    /// Factory default is -64 °C.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_cj_low_fault_threshold(&mut self, celsius: i8) {
        self.set_register(Register::Cjlf, celsius as u8);
    }

    /// Get the cold-junction low fault threshold in °C.
    pub fn cj_low_fault_threshold(&self) -> i8 {
        self.register(Register::Cjlf) as i8
    }

    /// Set the linearized-temperature high fault threshold in °C.
    ///
    /// The value is quantized to the register resolution of 0.0625 °C per
    /// LSB. Factory default is +2047.9375 °C.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_tc_high_fault_threshold(&mut self, celsius: f32) {
        self.set_tc_high_fault_threshold_raw((celsius / 0.0625) as i16);
    }

    /// Set the linearized-temperature high fault threshold as a raw
    /// register value (0.0625 °C per LSB).
    pub fn set_tc_high_fault_threshold_raw(&mut self, raw: i16) {
        let [high, low] = raw.to_be_bytes();
        self.set_register(Register::Lthfth, high);
        self.set_register(Register::Lthftl, low);
    }

    /// Get the linearized-temperature high fault threshold as a raw
    /// register value (0.0625 °C per LSB).
    pub fn tc_high_fault_threshold_raw(&self) -> i16 {
        i16::from_be_bytes([
            self.register(Register::Lthfth),
            self.register(Register::Lthftl),
        ])
    }

    /// Set the linearized-temperature low fault threshold in °C.
    ///
    /// The value is quantized to the register resolution of 0.0625 °C per
    /// LSB. Factory default is -2048 °C.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_tc_low_fault_threshold(&mut self, celsius: f32) {
        self.set_tc_low_fault_threshold_raw((celsius / 0.0625) as i16);
    }

    /// Set the linearized-temperature low fault threshold as a raw register
    /// value (0.0625 °C per LSB).
    pub fn set_tc_low_fault_threshold_raw(&mut self, raw: i16) {
        let [high, low] = raw.to_be_bytes();
        self.set_register(Register::Ltlfth, high);
        self.set_register(Register::Ltlftl, low);
    }

    /// Get the linearized-temperature low fault threshold as a raw register
    /// value (0.0625 °C per LSB).
    pub fn tc_low_fault_threshold_raw(&self) -> i16 {
        i16::from_be_bytes([
            self.register(Register::Ltlfth),
            self.register(Register::Ltlftl),
        ])
    }

    /// Set the cold-junction temperature offset in °C.
    ///
    /// The offset compensates for a temperature gradient between the chip
    /// and the actual cold junction. It is quantized to the register
    /// resolution of 0.0625 °C per LSB, giving a range of ±8 °C.
    ///
    /// The change takes effect when the image is written to the chip with
    /// [`RegisterImage::write_to`].
    pub fn set_cj_offset(&mut self, celsius: f32) {
        self.set_cj_offset_raw((celsius * 16.0) as i8);
    }

    /// Set the cold-junction temperature offset as a raw register value
    /// (0.0625 °C per LSB).
    pub fn set_cj_offset_raw(&mut self, raw: i8) {
        self.set_register(Register::Cjto, raw as u8);
    }

    /// Get the cold-junction temperature offset as a raw register value
    /// (0.0625 °C per LSB).
    pub fn cj_offset_raw(&self) -> i8 {
        self.register(Register::Cjto) as i8
    }

    /// Get the cold-junction temperature as a raw register value
    /// (0.00390625 °C per LSB).
    pub fn cold_junction_raw(&self) -> i16 {
        i16::from_be_bytes([self.register(Register::Cjth), self.register(Register::Cjtl)])
    }

    /// Get the linearized thermocouple temperature in ADC counts
    /// (0.0078125 °C per count).
    ///
    /// The three temperature bytes hold a 19-bit two's-complement value in
    /// their top bits; the bottom five bits are unused. The bytes are
    /// concatenated, sign-extended from bit 23 and arithmetic-shifted right
    /// by five to recover the signed count.
    pub fn thermocouple_raw(&self) -> i32 {
        let mut counts = i32::from(self.register(Register::Ltcbh)) << 16
            | i32::from(self.register(Register::Ltcbm)) << 8
            | i32::from(self.register(Register::Ltcbl));
        if counts & (1 << 23) != 0 {
            // fix sign
            counts |= !0x00FF_FFFF;
        }
        counts >> 5
    }

    /// Get the decoded fault status register.
    pub fn fault_status(&self) -> FaultStatus {
        FaultStatus::from_register(self.register(Register::Sr))
    }

    /// Compute every temperature quantity in the image, scaled to °C.
    ///
    /// Scale factors: cold-junction thresholds 1 °C/LSB,
    /// linearized-temperature thresholds and cold-junction offset
    /// 0.0625 °C/LSB, cold-junction temperature 0.00390625 °C/LSB,
    /// thermocouple temperature 0.0078125 °C per count.
    pub fn measurements(&self) -> Measurements {
        Measurements {
            cj_high_fault_threshold: f32::from(self.cj_high_fault_threshold()),
            cj_low_fault_threshold: f32::from(self.cj_low_fault_threshold()),
            tc_high_fault_threshold: f32::from(self.tc_high_fault_threshold_raw()) * 0.0625,
            tc_low_fault_threshold: f32::from(self.tc_low_fault_threshold_raw()) * 0.0625,
            cj_offset: f32::from(self.cj_offset_raw()) * 0.0625,
            cold_junction: f32::from(self.cold_junction_raw()) * 0.003_906_25,
            thermocouple: self.thermocouple_raw() as f32 * 0.007_812_5,
        }
    }

    /// Estimate how long one conversion takes with the current settings.
    ///
    /// The estimate depends on the conversion mode, the notch filter and
    /// the number of averaged samples. Figures are from the datasheet's
    /// timing characteristics.
    pub fn conversion_time(&self) -> ConversionTime {
        let extra = f32::from(self.averaging().samples() - 1);
        let (typical_ms, max_ms) = match (self.continuous_conversion(), self.noise_filter()) {
            (true, NoiseFilter::Hz50) => (98.0 + extra * 20.0, 110.0 + extra * 20.0),
            (true, NoiseFilter::Hz60) => (82.0 + extra * 16.67, 90.0 + extra * 16.67),
            (false, NoiseFilter::Hz50) => (169.0 + extra * 40.0, 185.0 + extra * 40.0),
            (false, NoiseFilter::Hz60) => (143.0 + extra * 33.3, 155.0 + extra * 33.3),
        };
        ConversionTime { typical_ms, max_ms }
    }

    /// Decode the response of a full register read burst.
    ///
    /// The buffer must be exactly [`READ_BURST_LEN`] bytes: byte 0 is
    /// whatever the chip clocked out during the address phase and is
    /// discarded, bytes 1 to 16 are registers `0x00` to `0x0F` in address
    /// order. Any byte values are accepted; a buffer of any other length is
    /// rejected rather than truncated or padded.
    pub fn from_read_burst(buffer: &[u8]) -> Result<RegisterImage, Error> {
        if buffer.len() != READ_BURST_LEN {
            return Err(Error::BurstLength { len: buffer.len() });
        }
        let mut registers = [0u8; NUM_REGISTERS];
        registers.copy_from_slice(&buffer[1..]);
        Ok(RegisterImage { registers })
    }

    /// Encode the image as a write burst.
    ///
    /// Byte 0 is the fixed write address `0x80` (register 0 with the write
    /// bit set); bytes 1 to 12 are registers `0x00` to `0x0B` in address
    /// order, ending with the cold-junction temperature low byte. The
    /// thermocouple temperature and fault status registers are read-only
    /// and never written. This ordering is the chip's register
    /// auto-increment contract and cannot be configured.
    pub fn to_write_burst(&self) -> [u8; WRITE_BURST_LEN] {
        let mut burst = [0u8; WRITE_BURST_LEN];
        burst[0] = WRITE_ADDRESS;
        burst[1..].copy_from_slice(&self.registers[..NUM_WRITABLE_REGISTERS]);
        burst
    }

    /// Read every register from the chip in one bus transaction.
    ///
    /// Clocks out the start address 0 (write bit clear) followed by dummy
    /// zero bytes while the register contents clock in. The chip expects
    /// SPI mode 1, MSB first, at up to 5 MHz.
    pub fn read_from<SPI>(spi: &mut SPI) -> Result<RegisterImage, SPI::Error>
    where
        SPI: SpiDevice,
    {
        let mut buffer = [0u8; READ_BURST_LEN];
        spi.transfer_in_place(&mut buffer)?;
        let mut registers = [0u8; NUM_REGISTERS];
        registers.copy_from_slice(&buffer[1..]);
        Ok(RegisterImage { registers })
    }

    /// Write the twelve writable registers to the chip in one bus
    /// transaction.
    ///
    /// The whole configuration goes down in a single burst, so the chip
    /// never sees a half-updated register file.
    pub fn write_to<SPI>(&self, spi: &mut SPI) -> Result<(), SPI::Error>
    where
        SPI: SpiDevice,
    {
        let burst = self.to_write_burst();
        #[cfg(feature = "defmt")]
        defmt::debug!("Writing MAX31856 register image: {:02x}", burst);
        spi.write(&burst)
    }

    /// Clear latched faults over the bus.
    ///
    /// Writes the configuration with the fault-clear flag set, then writes
    /// it again with the flag clear, mirroring the chip's self-clearing
    /// behaviour in the local image.
    pub fn clear_faults<SPI>(&mut self, spi: &mut SPI) -> Result<(), SPI::Error>
    where
        SPI: SpiDevice,
    {
        self.set_fault_clear(true);
        self.write_to(spi)?;
        self.set_fault_clear(false);
        self.write_to(spi)
    }
}

impl Default for RegisterImage {
    fn default() -> RegisterImage {
        RegisterImage::new()
    }
}

//
// impls on Private Types
//

// None

//
// Tests
//

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal::spi::Operation;

    /// Stands in for the bus: records what the driver clocks out and
    /// answers full-duplex transfers with a canned response.
    struct LoopbackSpi {
        response: [u8; READ_BURST_LEN],
        mosi: [[u8; READ_BURST_LEN]; 4],
        lengths: [usize; 4],
        transactions: usize,
    }

    impl LoopbackSpi {
        fn new(response: [u8; READ_BURST_LEN]) -> LoopbackSpi {
            LoopbackSpi {
                response,
                mosi: [[0; READ_BURST_LEN]; 4],
                lengths: [0; 4],
                transactions: 0,
            }
        }
    }

    impl embedded_hal::spi::ErrorType for LoopbackSpi {
        type Error = core::convert::Infallible;
    }

    impl SpiDevice for LoopbackSpi {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for operation in operations {
                match operation {
                    Operation::Write(bytes) => {
                        self.mosi[self.transactions][..bytes.len()].copy_from_slice(bytes);
                        self.lengths[self.transactions] = bytes.len();
                        self.transactions += 1;
                    }
                    Operation::TransferInPlace(buffer) => {
                        self.mosi[self.transactions][..buffer.len()].copy_from_slice(buffer);
                        self.lengths[self.transactions] = buffer.len();
                        self.transactions += 1;
                        let n = buffer.len().min(self.response.len());
                        buffer[..n].copy_from_slice(&self.response[..n]);
                    }
                    _ => unreachable!("driver only writes and transfers in place"),
                }
            }
            Ok(())
        }
    }

    const WRITABLE: [Register; 12] = [
        Register::Cr0,
        Register::Cr1,
        Register::Mask,
        Register::Cjhf,
        Register::Cjlf,
        Register::Lthfth,
        Register::Lthftl,
        Register::Ltlfth,
        Register::Ltlftl,
        Register::Cjto,
        Register::Cjth,
        Register::Cjtl,
    ];

    #[test]
    fn factory_defaults_encode_to_documented_burst() {
        let image = RegisterImage::new();
        assert_eq!(
            image.to_write_burst(),
            [0x80, 0x00, 0x03, 0xFF, 0x7F, 0xC0, 0x7F, 0xFF, 0x80, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn reset_restores_factory_defaults() {
        let mut image = RegisterImage::new();
        image.set_continuous_conversion(true);
        image.set_thermocouple_type(ThermocoupleType::T);
        image.set_all_faults_masked(false);
        image.reset_to_defaults();
        assert_eq!(image, RegisterImage::new());
    }

    #[test]
    fn writable_registers_survive_a_round_trip() {
        let mut image = RegisterImage::new();
        image.set_continuous_conversion(true);
        image.set_open_circuit_mode(OpenCircuitMode::RsBelow5k);
        image.set_noise_filter(NoiseFilter::Hz50);
        image.set_fault_mode(FaultMode::Interrupt);
        image.set_thermocouple_type(ThermocoupleType::N);
        image.set_averaging(SampleAveraging::Four);
        image.set_fault_masked(FaultSource::OpenCircuit, false);
        image.set_cj_high_fault_threshold(85);
        image.set_cj_low_fault_threshold(-55);
        image.set_tc_high_fault_threshold_raw(0x0640);
        image.set_tc_low_fault_threshold_raw(-0x0640);
        image.set_cj_offset_raw(-16);

        // What a later read would return: address echo, the written
        // registers, then the read-only tail.
        let burst = image.to_write_burst();
        let mut response = [0u8; READ_BURST_LEN];
        response[1..WRITE_BURST_LEN].copy_from_slice(&burst[1..]);
        let decoded = RegisterImage::from_read_burst(&response).unwrap();

        for register in WRITABLE {
            assert_eq!(
                image.register(register),
                decoded.register(register),
                "register {:?} did not round-trip",
                register
            );
        }
        assert!(decoded.continuous_conversion());
        assert_eq!(decoded.thermocouple_type(), ThermocoupleType::N);
        assert_eq!(decoded.averaging(), SampleAveraging::Four);
        assert_eq!(decoded.cj_offset_raw(), -16);
    }

    #[test]
    fn read_burst_of_wrong_length_is_rejected() {
        assert_eq!(
            RegisterImage::from_read_burst(&[0; 16]),
            Err(Error::BurstLength { len: 16 })
        );
        assert_eq!(
            RegisterImage::from_read_burst(&[0; 18]),
            Err(Error::BurstLength { len: 18 })
        );
    }

    #[test]
    fn thermocouple_reading_sign_extends() {
        let mut image = RegisterImage::new();
        assert_eq!(image.thermocouple_raw(), 0);
        assert_eq!(image.measurements().thermocouple, 0.0);

        image.set_register(Register::Ltcbh, 0x19);
        assert_eq!(image.thermocouple_raw(), 51_200);
        assert_eq!(image.measurements().thermocouple, 400.0);

        // Bit 23 set: the same magnitude, negative
        image.set_register(Register::Ltcbh, 0xE7);
        assert_eq!(image.thermocouple_raw(), -51_200);
        assert_eq!(image.measurements().thermocouple, -400.0);
    }

    #[test]
    fn thermocouple_low_bits_are_discarded() {
        let mut image = RegisterImage::new();
        // 25 °C reading with all five unused bits set
        image.set_register(Register::Ltcbh, 0x01);
        image.set_register(Register::Ltcbm, 0x90);
        image.set_register(Register::Ltcbl, 0x1F);
        assert_eq!(image.thermocouple_raw(), 3200);
        assert_eq!(image.measurements().thermocouple, 25.0);
    }

    #[test]
    fn cold_junction_scale_factor() {
        let mut image = RegisterImage::new();
        image.set_register(Register::Cjth, 0x01);
        image.set_register(Register::Cjtl, 0x00);
        assert_eq!(image.cold_junction_raw(), 256);
        assert_eq!(image.measurements().cold_junction, 1.0);
    }

    #[test]
    fn threshold_scale_factors() {
        let mut image = RegisterImage::new();
        image.set_tc_high_fault_threshold_raw(16);
        assert_eq!(image.measurements().tc_high_fault_threshold, 1.0);

        let defaults = RegisterImage::new().measurements();
        assert_eq!(defaults.cj_high_fault_threshold, 127.0);
        assert_eq!(defaults.cj_low_fault_threshold, -64.0);
        assert_eq!(defaults.tc_high_fault_threshold, 2047.9375);
        assert_eq!(defaults.tc_low_fault_threshold, -2048.0);
        assert_eq!(defaults.cj_offset, 0.0);
    }

    #[test]
    fn celsius_threshold_setters_hit_documented_encodings() {
        let mut image = RegisterImage::new();
        image.set_tc_high_fault_threshold(100.0);
        assert_eq!(image.register(Register::Lthfth), 0x06);
        assert_eq!(image.register(Register::Lthftl), 0x40);

        image.set_tc_low_fault_threshold(-270.0);
        assert_eq!(image.tc_low_fault_threshold_raw(), -4320);

        image.set_cj_offset(1.0);
        assert_eq!(image.cj_offset_raw(), 16);
        assert_eq!(image.measurements().cj_offset, 1.0);
    }

    #[test]
    fn averaging_selector_is_width_checked() {
        let mut image = RegisterImage::new();
        assert_eq!(image.set_averaging_raw(7), Ok(()));
        assert_eq!(image.averaging(), SampleAveraging::Sixteen);
        assert_eq!(image.averaging().samples(), 16);

        assert_eq!(
            image.set_averaging_raw(8),
            Err(Error::FieldRange { value: 8, width: 3 })
        );
        // The rejected write left the field untouched
        assert_eq!(image.averaging(), SampleAveraging::Sixteen);
    }

    #[test]
    fn thermocouple_type_selector_is_width_checked() {
        let mut image = RegisterImage::new();
        assert_eq!(image.set_thermocouple_type_raw(9), Ok(()));
        assert_eq!(image.thermocouple_type(), ThermocoupleType::VoltageGain8);
        assert_eq!(image.set_thermocouple_type_raw(15), Ok(()));
        assert_eq!(image.thermocouple_type(), ThermocoupleType::VoltageGain32);
        assert_eq!(
            image.set_thermocouple_type_raw(16),
            Err(Error::FieldRange {
                value: 16,
                width: 4
            })
        );
        // Raw selector values survive in the register byte as written
        assert_eq!(image.register(Register::Cr1), 0x0F);
    }

    #[test]
    fn open_circuit_selector_is_width_checked() {
        let mut image = RegisterImage::new();
        assert_eq!(image.set_open_circuit_mode_raw(2), Ok(()));
        assert_eq!(image.open_circuit_mode(), OpenCircuitMode::TcBelow2ms);
        assert_eq!(
            image.set_open_circuit_mode_raw(4),
            Err(Error::FieldRange { value: 4, width: 2 })
        );
    }

    #[test]
    fn cr0_flags_land_on_their_bits() {
        let mut image = RegisterImage::new();
        image.set_continuous_conversion(true);
        image.set_one_shot(true);
        image.set_open_circuit_mode(OpenCircuitMode::TcAbove2ms);
        image.set_cold_junction_disabled(true);
        image.set_fault_mode(FaultMode::Interrupt);
        image.set_fault_clear(true);
        image.set_noise_filter(NoiseFilter::Hz50);
        assert_eq!(image.register(Register::Cr0), 0b1111_1111);

        image.set_one_shot(false);
        image.set_fault_clear(false);
        assert_eq!(image.register(Register::Cr0), 0b1011_1101);
        assert!(image.continuous_conversion());
        assert!(!image.one_shot());
        assert!(image.cold_junction_disabled());
        assert_eq!(image.fault_mode(), FaultMode::Interrupt);
        assert_eq!(image.noise_filter(), NoiseFilter::Hz50);
    }

    #[test]
    fn mask_flags_preserve_reserved_bits() {
        let mut image = RegisterImage::new();
        // All sources masked at power-on reset
        assert!(image.fault_masked(FaultSource::OpenCircuit));
        assert!(image.fault_masked(FaultSource::ColdJunctionHigh));

        image.set_fault_masked(FaultSource::OpenCircuit, false);
        assert!(!image.fault_masked(FaultSource::OpenCircuit));
        assert_eq!(image.register(Register::Mask), 0xFE);

        image.set_all_faults_masked(false);
        // Reserved bits 7:6 keep their power-on value
        assert_eq!(image.register(Register::Mask), 0xC0);
    }

    #[test]
    fn fault_status_decodes_every_bit() {
        let mut response = [0u8; READ_BURST_LEN];
        response[16] = 0b1010_0001;
        let image = RegisterImage::from_read_burst(&response).unwrap();
        let status = image.fault_status();
        assert!(status.cj_range);
        assert!(status.cj_high);
        assert!(status.open);
        assert!(!status.tc_range);
        assert!(!status.cj_low);
        assert!(!status.tc_high);
        assert!(!status.tc_low);
        assert!(!status.ovuv);
        assert!(status.has_fault());

        assert!(!RegisterImage::new().fault_status().has_fault());
    }

    #[test]
    fn conversion_time_follows_mode_filter_and_averaging() {
        // Power-on reset: normally off, 60 Hz, single sample
        let mut image = RegisterImage::new();
        let time = image.conversion_time();
        assert_eq!(time.typical_ms, 143.0);
        assert_eq!(time.max_ms, 155.0);

        image.set_continuous_conversion(true);
        image.set_noise_filter(NoiseFilter::Hz50);
        image.set_averaging(SampleAveraging::Sixteen);
        let time = image.conversion_time();
        assert_eq!(time.typical_ms, 398.0);
        assert_eq!(time.max_ms, 410.0);
    }

    #[test]
    fn read_clocks_out_zeros_and_decodes_the_response() {
        let mut response = [0u8; READ_BURST_LEN];
        response[0] = 0xA5; // address-phase garbage, must be discarded
        response[1] = 0x80; // CR0 with CMODE set
        response[13] = 0x19; // thermocouple high byte
        let mut spi = LoopbackSpi::new(response);

        let image = RegisterImage::read_from(&mut spi).unwrap();
        assert!(image.continuous_conversion());
        assert_eq!(image.thermocouple_raw(), 51_200);

        assert_eq!(spi.transactions, 1);
        assert_eq!(spi.lengths[0], READ_BURST_LEN);
        assert_eq!(spi.mosi[0], [0u8; READ_BURST_LEN]);
    }

    #[test]
    fn write_sends_the_encoded_burst() {
        let mut spi = LoopbackSpi::new([0; READ_BURST_LEN]);
        let mut image = RegisterImage::new();
        image.set_thermocouple_type(ThermocoupleType::K);
        image.set_averaging(SampleAveraging::Eight);
        image.write_to(&mut spi).unwrap();

        assert_eq!(spi.transactions, 1);
        assert_eq!(spi.lengths[0], WRITE_BURST_LEN);
        assert_eq!(spi.mosi[0][..WRITE_BURST_LEN], image.to_write_burst());
    }

    #[test]
    fn clear_faults_pulses_the_flag() {
        let mut spi = LoopbackSpi::new([0; READ_BURST_LEN]);
        let mut image = RegisterImage::new();
        image.clear_faults(&mut spi).unwrap();

        assert_eq!(spi.transactions, 2);
        // First burst carries the flag, second returns to normal operation
        assert_eq!(spi.mosi[0][1] & 0x02, 0x02);
        assert_eq!(spi.mosi[1][1] & 0x02, 0x00);
        assert!(!image.fault_clear());
    }
}

//
// End of file
//
