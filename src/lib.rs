pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod verify_receipt_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod legacy_receipt_model;
            pub(crate) mod receipt_model;
            pub(crate) mod request_body_model;
            pub(crate) mod response_body_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod receipt_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod environment;
        pub mod receipt;
        pub mod verification_status;
    }
    pub mod repositories {
        pub mod receipt_repository;
    }
}

pub mod config;
pub mod constants;
pub mod errors;
pub mod util;

pub use config::ReceiptVerifierConfig;
pub use domain::entities::{
    environment::Environment,
    receipt::{LegacyReceipt, PurchaseReceipt, Receipt, VerifiedReceipt},
    verification_status::VerificationStatus,
};
pub use errors::VerificationError;
pub use util::ReceiptVerifierUtil;
