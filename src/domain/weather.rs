use serde::{Deserialize, Serialize};

/// Weather taxonomy derived from the forecast service's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    // ---
    Sunny,
    Clear,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunder,
}

impl WeatherCondition {
    // ---
    /// Codes outside the known bands read as sunny.
    pub fn from_code(code: u32, is_day: bool) -> Self {
        // ---
        match code {
            0 if is_day => Self::Sunny,
            0 => Self::Clear,
            1..=3 => Self::Cloudy,
            45..=48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 => Self::Rain,
            71..=77 => Self::Snow,
            95.. => Self::Thunder,
            _ => Self::Sunny,
        }
    }

    /// Translation key of the label.
    pub fn label_key(&self) -> &'static str {
        // ---
        match self {
            Self::Sunny => "w_sunny",
            Self::Clear => "w_clear",
            Self::Cloudy => "w_cloudy",
            Self::Fog => "w_fog",
            Self::Drizzle => "w_drizzle",
            Self::Rain => "w_rain",
            Self::Snow => "w_snow",
            Self::Thunder => "w_thunder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    // ---
    pub temperature: i32,
    pub code: u32,
    pub is_day: bool,
    pub condition: WeatherCondition,
}

impl WeatherReading {
    // ---
    pub fn new(temperature: f64, code: u32, is_day: bool) -> Self {
        // ---
        Self {
            temperature: temperature.round() as i32,
            code,
            is_day,
            condition: WeatherCondition::from_code(code, is_day),
        }
    }

    /// Advice shown under the widget: any precipitation first, then heat.
    pub fn tip_key(&self) -> Option<&'static str> {
        // ---
        if self.code >= 51 {
            Some("tip_rain")
        } else if self.temperature > 35 {
            Some("tip_hot")
        } else {
            None
        }
    }
}

/// Latest reading plus a loading flag, as shown in the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherState {
    // ---
    pub reading: Option<WeatherReading>,
    pub loading: bool,
}

impl Default for WeatherState {
    // ---
    fn default() -> Self {
        // ---
        Self {
            reading: None,
            loading: true,
        }
    }
}

impl WeatherState {
    // ---
    /// A failed poll keeps the previous reading.
    pub fn apply(&mut self, polled: Option<WeatherReading>) {
        // ---
        if let Some(reading) = polled {
            self.reading = Some(reading);
        }
        self.loading = false;
    }
}
