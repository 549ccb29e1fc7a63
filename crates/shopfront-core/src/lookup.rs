//! Backend integer enumerations and their display labels.
//!
//! The backend stores order status, delivery method and payment type as bare
//! integers. Each enum here owns a total mapping in both directions; unknown
//! codes are rejected with [`UnknownCode`] instead of falling back to a
//! default label.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} code: {value}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
}

/// Generates the code/label/name tables for one backend enum.
macro_rules! backend_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident = $code:literal, $label:literal, $cli:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            #[must_use]
            pub fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Human-readable label shown in listings.
            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Kebab-case name accepted on the command line.
            #[must_use]
            pub fn cli_name(self) -> &'static str {
                match self {
                    $($name::$variant => $cli,)+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = UnknownCode;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                match value {
                    $($code => Ok($name::$variant),)+
                    other => Err(UnknownCode {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownCode;

            /// Accepts either the CLI name or the numeric code.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if let Ok(code) = trimmed.parse::<i32>() {
                    return $name::try_from(code);
                }
                let lowered = trimmed.to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.cli_name() == lowered)
                    .ok_or_else(|| UnknownCode {
                        kind: $kind,
                        value: trimmed.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

backend_enum! {
    /// Lifecycle state of an order.
    OrderStatus, "order status" {
        Pending = 1, "Pending", "pending";
        InProgress = 2, "In progress", "in-progress";
        Delivered = 3, "Delivered", "delivered";
        Canceled = 4, "Canceled", "canceled";
    }
}

backend_enum! {
    DeliveryMethod, "delivery method" {
        DriveThru = 1, "Drive-thru", "drive-thru";
        OnHand = 2, "On hand", "on-hand";
        HomeDelivery = 3, "Home delivery", "home-delivery";
    }
}

backend_enum! {
    PaymentType, "payment type" {
        Cash = 1, "Cash", "cash";
        Card = 2, "Card", "card";
        DebitCard = 3, "Debit card", "debit-card";
        CreditCard = 4, "Credit card", "credit-card";
        BankTransfer = 5, "Bank transfer", "bank-transfer";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_maps_back_to_itself() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::try_from(status.code()).unwrap(), *status);
        }
        for method in DeliveryMethod::ALL {
            assert_eq!(DeliveryMethod::try_from(method.code()).unwrap(), *method);
        }
        for payment in PaymentType::ALL {
            assert_eq!(PaymentType::try_from(payment.code()).unwrap(), *payment);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = OrderStatus::try_from(9).unwrap_err();
        assert_eq!(err.kind, "order status");
        assert_eq!(err.value, "9");
        assert!(PaymentType::try_from(0).is_err());
    }

    #[test]
    fn parses_cli_names_case_insensitively() {
        assert_eq!(
            "Home-Delivery".parse::<DeliveryMethod>().unwrap(),
            DeliveryMethod::HomeDelivery
        );
        assert_eq!(
            "credit-card".parse::<PaymentType>().unwrap(),
            PaymentType::CreditCard
        );
        assert_eq!("3".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert!("teleport".parse::<DeliveryMethod>().is_err());
    }

    #[test]
    fn serializes_as_backend_integer() {
        let json = serde_json::to_string(&PaymentType::BankTransfer).unwrap();
        assert_eq!(json, "5");
        let parsed: OrderStatus = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, OrderStatus::InProgress);
    }

    #[test]
    fn deserializing_unknown_integer_fails() {
        let result = serde_json::from_str::<DeliveryMethod>("7");
        assert!(result.is_err());
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(OrderStatus::InProgress.to_string(), "In progress");
        assert_eq!(DeliveryMethod::DriveThru.label(), "Drive-thru");
    }
}
