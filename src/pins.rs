//! GPIO / peripheral pin assignments for the Firewatch board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Bitmap display (SSD1306, I2C)
// ---------------------------------------------------------------------------

pub const DISPLAY_SDA_GPIO: i32 = 14;
pub const DISPLAY_SCL_GPIO: i32 = 15;
/// 7-bit I2C address of the display controller.
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;
pub const DISPLAY_I2C_FREQ_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Analog inputs (ADC1)
// ---------------------------------------------------------------------------

/// Temperature sensor / joystick X axis (ADC1 channel 0).
pub const SENSOR_X_ADC_GPIO: i32 = 1;
/// Joystick Y axis (ADC1 channel 1).
pub const SENSOR_Y_ADC_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Digital inputs (active-low, internal pull-up, falling-edge IRQ)
// ---------------------------------------------------------------------------

/// Button A: device reset request.
pub const RESET_BUTTON_GPIO: i32 = 5;
/// Button B: hazard override (simulated fire detector).
pub const HAZARD_BUTTON_GPIO: i32 = 6;
/// Joystick push: LED output enable toggle.
pub const LED_TOGGLE_GPIO: i32 = 16;
/// Mode button: display border style.
pub const MODE_BUTTON_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 13;
pub const LED_G_GPIO: i32 = 11;
pub const LED_B_GPIO: i32 = 12;
/// LED PWM frequency.
pub const LED_PWM_FREQ_HZ: u32 = 1_000;

/// 5x5 addressable LED matrix data line.
pub const LED_MATRIX_GPIO: i32 = 7;

/// Passive buzzer, driven as a plain on/off line.
pub const BUZZER_GPIO: i32 = 21;
