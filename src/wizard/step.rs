//! Wizard step numbering

use std::fmt;

/// The five wizard steps, numbered 1 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BookingStep {
    #[default]
    Service = 1,
    Time = 2,
    Details = 3,
    Payment = 4,
    Confirm = 5,
}

impl BookingStep {
    pub const FIRST: Self = Self::Service;
    pub const LAST: Self = Self::Confirm;

    pub fn all() -> &'static [Self] {
        &[
            Self::Service,
            Self::Time,
            Self::Details,
            Self::Payment,
            Self::Confirm,
        ]
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Step for a number, clamped into 1..=5
    pub fn from_number(n: i32) -> Self {
        match n {
            i32::MIN..=1 => Self::Service,
            2 => Self::Time,
            3 => Self::Details,
            4 => Self::Payment,
            _ => Self::Confirm,
        }
    }

    /// The following step; `Confirm` stays put
    pub fn next(self) -> Self {
        Self::from_number(self.number() as i32 + 1)
    }

    /// The preceding step; `Service` stays put
    pub fn prev(self) -> Self {
        Self::from_number(self.number() as i32 - 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Time => "Date & Time",
            Self::Details => "Address & Contact",
            Self::Payment => "Payment",
            Self::Confirm => "Confirm",
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}/5: {}", self.number(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        let numbers: Vec<u8> = BookingStep::all().iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(BookingStep::from_number(-3), BookingStep::Service);
        assert_eq!(BookingStep::from_number(99), BookingStep::Confirm);
        assert_eq!(BookingStep::Service.prev(), BookingStep::Service);
        assert_eq!(BookingStep::Confirm.next(), BookingStep::Confirm);
        assert_eq!(BookingStep::Time.next(), BookingStep::Details);
    }

    #[test]
    fn test_display() {
        assert_eq!(BookingStep::Payment.to_string(), "Step 4/5: Payment");
    }
}
