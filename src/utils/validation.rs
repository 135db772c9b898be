//! Validation utilities

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LedgerError::InvalidInput(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that an amount is zero or more
pub fn validate_non_negative_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(LedgerError::InvalidInput(
            "Amount cannot be negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a months-paid count is inside the accepted bound
pub fn validate_months_paid(months: u32) -> LedgerResult<()> {
    if (MIN_MONTHS_PAID..=MAX_MONTHS_PAID).contains(&months) {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput(format!(
            "Months paid must be between {} and {}, got {}",
            MIN_MONTHS_PAID, MAX_MONTHS_PAID, months
        )))
    }
}

/// Validate that a room ID is usable as a natural key
pub fn validate_room_id(room_id: &str) -> LedgerResult<()> {
    if room_id.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "Room ID cannot be empty".to_string(),
        ));
    }

    if room_id.len() > 50 {
        return Err(LedgerError::InvalidInput(
            "Room ID cannot exceed 50 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced room validator with detailed checks
pub struct EnhancedRoomValidator;

impl RoomValidator for EnhancedRoomValidator {
    fn validate_room(&self, room: &Room) -> LedgerResult<()> {
        validate_room_id(&room.room_id)?;
        validate_non_negative_amount(&room.rent_price)?;
        validate_non_negative_amount(&room.amount_paid)?;

        if room.tenant_name.len() > 100 {
            return Err(LedgerError::InvalidInput(
                "Tenant name cannot exceed 100 characters".to_string(),
            ));
        }

        if room.notes.len() > 1000 {
            return Err(LedgerError::InvalidInput(
                "Notes cannot exceed 1000 characters".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_update(&self, update: &RoomUpdate) -> LedgerResult<()> {
        validate_non_negative_amount(&update.rent_price)?;

        if update.tenant_name.len() > 100 {
            return Err(LedgerError::InvalidInput(
                "Tenant name cannot exceed 100 characters".to_string(),
            ));
        }

        if update.notes.len() > 1000 {
            return Err(LedgerError::InvalidInput(
                "Notes cannot exceed 1000 characters".to_string(),
            ));
        }

        Ok(())
    }
}

/// Enhanced payment validator with detailed checks
pub struct EnhancedPaymentValidator;

impl PaymentValidator for EnhancedPaymentValidator {
    fn validate_payment(&self, payment: &Payment) -> LedgerResult<()> {
        validate_room_id(&payment.room_id)?;
        validate_positive_amount(&payment.amount)?;
        validate_months_paid(payment.months_paid)?;

        if payment.id.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "Payment ID cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
