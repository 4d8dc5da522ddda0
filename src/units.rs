//! Measurement unit selection and the decimal places derived from it.

use log::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn new(os: Option<&str>) -> Self {
        match os.map(|s| s.trim().to_uppercase()) {
            Some(s) if s == "F" || s == "FAHRENHEIT" => Self::Fahrenheit,
            _ => Self::Celsius, // Fallback, default
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    pub const fn label_no_degree(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindUnit {
    #[default]
    MetresPerSecond,
    KilometresPerHour,
    MilesPerHour,
    Knots,
}

impl WindUnit {
    pub fn new(os: Option<&str>) -> Self {
        match os.map(|s| s.trim().to_uppercase()).as_deref() {
            Some("KM/H" | "KMH" | "KPH") => Self::KilometresPerHour,
            Some("MPH") => Self::MilesPerHour,
            Some("KT" | "KN" | "KNOTS") => Self::Knots,
            _ => Self::MetresPerSecond,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::MetresPerSecond => "m/s",
            Self::KilometresPerHour => "km/h",
            Self::MilesPerHour => "mph",
            Self::Knots => "kt",
        }
    }

    /// Unit of the daily wind run matching the speed unit.
    pub const fn run_label(&self) -> &'static str {
        match self {
            Self::MetresPerSecond | Self::KilometresPerHour => "km",
            Self::MilesPerHour => "miles",
            Self::Knots => "nm",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PressureUnit {
    #[default]
    Hectopascals,
    Millibars,
    InchesOfMercury,
}

impl PressureUnit {
    pub fn new(os: Option<&str>) -> Self {
        match os.map(|s| s.trim().to_uppercase()).as_deref() {
            Some("MB" | "MILLIBAR" | "MILLIBARS") => Self::Millibars,
            Some("IN" | "INHG") => Self::InchesOfMercury,
            _ => Self::Hectopascals,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hectopascals => "hPa",
            Self::Millibars => "mb",
            Self::InchesOfMercury => "in",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RainUnit {
    #[default]
    Millimetres,
    Inches,
}

impl RainUnit {
    pub fn new(os: Option<&str>) -> Self {
        match os.map(|s| s.trim().to_uppercase()).as_deref() {
            Some("IN" | "INCH" | "INCHES") => Self::Inches,
            _ => Self::Millimetres,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Millimetres => "mm",
            Self::Inches => "in",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Units {
    pub temperature: TempUnit,
    pub wind: WindUnit,
    pub pressure: PressureUnit,
    pub rain: RainUnit,
}

impl Units {
    pub fn new(
        temperature: Option<&str>,
        wind: Option<&str>,
        pressure: Option<&str>,
        rain: Option<&str>,
    ) -> Self {
        Self {
            temperature: TempUnit::new(temperature),
            wind: WindUnit::new(wind),
            pressure: PressureUnit::new(pressure),
            rain: RainUnit::new(rain),
        }
    }
}

/// Decimal places per physical quantity, computed once at startup so that
/// every rendered output of the same instant agrees bit for bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalSettings {
    pub temperature: usize,
    pub humidity: usize,
    pub pressure: usize,
    pub wind: usize,
    pub wind_run: usize,
    pub rain: usize,
    pub rain_rate: usize,
    pub uv: usize,
    pub solar: usize,
    pub air_quality: usize,
    pub sunshine: usize,
    pub distance: usize,
}

impl DecimalSettings {
    pub fn new(units: &Units) -> Self {
        let rain = match units.rain {
            RainUnit::Millimetres => 1,
            RainUnit::Inches => 2,
        };
        Self {
            temperature: 1,
            humidity: 0,
            pressure: match units.pressure {
                PressureUnit::InchesOfMercury => 2,
                _ => 1,
            },
            wind: 1,
            wind_run: 1,
            rain,
            rain_rate: rain,
            uv: 1,
            solar: 0,
            air_quality: 1,
            sunshine: 1,
            distance: 1,
        }
    }

    /// Apply a per-quantity override from configuration. Returns false for an
    /// unrecognised quantity name.
    pub fn set_override(&mut self, quantity: &str, dp: usize) -> bool {
        match quantity {
            "temperature" => self.temperature = dp,
            "humidity" => self.humidity = dp,
            "pressure" => self.pressure = dp,
            "wind" => self.wind = dp,
            "wind_run" => self.wind_run = dp,
            "rain" => self.rain = dp,
            "rain_rate" => self.rain_rate = dp,
            "uv" => self.uv = dp,
            "solar" => self.solar = dp,
            "air_quality" => self.air_quality = dp,
            "sunshine" => self.sunshine = dp,
            "distance" => self.distance = dp,
            _ => {
                warn!("unknown decimal override '{quantity}' ignored");
                return false;
            }
        }
        true
    }
}

impl Default for DecimalSettings {
    fn default() -> Self {
        Self::new(&Units::default())
    }
}

/// The quantity a table-driven tag formats, mapping to its decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Temperature,
    Humidity,
    Pressure,
    Wind,
    WindRun,
    Rain,
    RainRate,
    Uv,
    Solar,
    AirQuality,
    Sunshine,
    Distance,
    Degrees,
    Index,
    Days,
}

impl Measure {
    pub fn decimals(&self, settings: &DecimalSettings) -> usize {
        match self {
            Self::Temperature => settings.temperature,
            Self::Humidity => settings.humidity,
            Self::Pressure => settings.pressure,
            Self::Wind => settings.wind,
            Self::WindRun => settings.wind_run,
            Self::Rain => settings.rain,
            Self::RainRate => settings.rain_rate,
            Self::Uv => settings.uv,
            Self::Solar => settings.solar,
            Self::AirQuality => settings.air_quality,
            Self::Sunshine => settings.sunshine,
            Self::Distance => settings.distance,
            Self::Degrees | Self::Index | Self::Days => 0,
        }
    }
}
