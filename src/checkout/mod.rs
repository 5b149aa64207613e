//! Checkout state machine
//!
//! A strictly linear three-step flow (personal → billing → confirmation)
//! over a read-only view of the cart. Each step is its own type carrying
//! exactly the data valid at that point, and the transition methods are the
//! only way to move forward, so skipping or reordering steps does not
//! compile. Dropping the machine at any step abandons the draft: nothing it
//! collected is persisted, and billing details are wiped from memory.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartSession},
    pricing::TotalError,
    storage::StorageSlot,
    validation::{FieldErrors, FieldValues},
};

pub mod forms;

pub use forms::{BillingInfo, PersonalInfo, billing_info_schema, personal_info_schema};

/// Route handed to the navigator once an order settles.
pub const CONFIRMATION_PATH: &str = "/checkout/success";

/// Errors starting a checkout attempt.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Checkout refuses to start with nothing to purchase.
    #[error("cannot start checkout with an empty cart")]
    EmptyCart,

    /// The cart total could not be computed.
    #[error(transparent)]
    Total(#[from] TotalError),
}

/// Errors from the payment collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// The gateway rejected the order.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The gateway could not be reached.
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Payment collaborator consulted when an order settles.
///
/// Replaces the original storefront's fixed settle delay with an explicit
/// success/failure contract; the cart is only cleared once this accepts.
pub trait PaymentGateway {
    /// Authorize the order, returning once the submission is accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] when the order is rejected or the gateway
    /// is unreachable; the caller leaves the cart intact.
    fn authorize(&self, order: &Order) -> Result<(), PaymentError>;
}

/// Gateway that accepts every order, reproducing the original storefront's
/// simulated settlement.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl PaymentGateway for AcceptAll {
    fn authorize(&self, _order: &Order) -> Result<(), PaymentError> {
        Ok(())
    }
}

/// Router collaborator; receives the confirmation path on success.
pub trait Navigator {
    /// Move the UI to `path`.
    fn navigate(&mut self, path: &str);
}

/// The order assembled by a completed billing step.
#[derive(Debug)]
pub struct Order {
    personal: PersonalInfo,
    billing: BillingInfo,
    total: Money<'static, Currency>,
}

impl Order {
    /// Contact and shipping details for the order.
    #[must_use]
    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    /// Payment details for the order.
    #[must_use]
    pub fn billing(&self) -> &BillingInfo {
        &self.billing
    }

    /// Cart total the order was placed at.
    #[must_use]
    pub fn total(&self) -> &Money<'static, Currency> {
        &self.total
    }
}

/// Step one: collecting personal information.
#[derive(Debug)]
pub struct Personal(());

/// Step two: personal information accepted, collecting billing details.
#[derive(Debug)]
pub struct Billing {
    personal: PersonalInfo,
}

/// Terminal step: order assembled and awaiting settlement.
#[derive(Debug)]
pub struct Confirmation {
    order: Order,
}

/// A checkout attempt currently in step `S`.
///
/// Holds the cart total snapshot taken when the attempt began and the data
/// collected so far. The draft never outlives the attempt.
#[derive(Debug)]
pub struct Checkout<S> {
    total: Money<'static, Currency>,
    step: S,
}

/// A rejected step submission: the unchanged machine plus the reasons.
#[derive(Debug)]
pub struct StepRejection<S> {
    /// The machine, still in the step that rejected the submission.
    pub checkout: Checkout<S>,

    /// Field-level rejection reasons to surface inline.
    pub errors: FieldErrors,
}

impl<S> Checkout<S> {
    /// Cart total snapshot taken when the attempt began.
    #[must_use]
    pub fn total(&self) -> &Money<'static, Currency> {
        &self.total
    }
}

impl Checkout<Personal> {
    /// Begin a checkout attempt over the current cart.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: there is nothing to purchase.
    /// - [`CheckoutError::Total`]: the cart total could not be computed.
    pub fn begin(cart: &Cart) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Checkout {
            total: cart.total()?,
            step: Personal(()),
        })
    }

    /// Submit the personal information step.
    ///
    /// # Errors
    ///
    /// Hands the machine back unchanged along with the field errors; the
    /// draft and the cart are untouched.
    pub fn submit(
        self,
        values: &FieldValues,
    ) -> Result<Checkout<Billing>, StepRejection<Personal>> {
        let Checkout { total, step } = self;

        match PersonalInfo::parse(values) {
            Ok(personal) => Ok(Checkout {
                total,
                step: Billing { personal },
            }),
            Err(errors) => Err(StepRejection {
                checkout: Checkout { total, step },
                errors,
            }),
        }
    }
}

impl Checkout<Billing> {
    /// Personal information accepted in step one.
    #[must_use]
    pub fn personal(&self) -> &PersonalInfo {
        &self.step.personal
    }

    /// Submit the billing information step, assembling the order.
    ///
    /// # Errors
    ///
    /// Hands the machine back unchanged along with the field errors; the
    /// draft and the cart are untouched.
    pub fn submit(
        self,
        values: &FieldValues,
    ) -> Result<Checkout<Confirmation>, StepRejection<Billing>> {
        let Checkout { total, step } = self;

        match BillingInfo::parse(values) {
            Ok(billing) => {
                let order = Order {
                    personal: step.personal,
                    billing,
                    total,
                };

                Ok(Checkout {
                    total,
                    step: Confirmation { order },
                })
            }
            Err(errors) => Err(StepRejection {
                checkout: Checkout { total, step },
                errors,
            }),
        }
    }
}

impl Checkout<Confirmation> {
    /// The assembled order awaiting settlement.
    #[must_use]
    pub fn order(&self) -> &Order {
        &self.step.order
    }

    /// Settle the order: authorize with the gateway, then clear the cart
    /// and hand off to the order-confirmation route.
    ///
    /// The cart is cleared only after the gateway accepts; a declined or
    /// unreachable gateway leaves it intact so the order is not lost. The
    /// draft is consumed either way — confirmation is terminal, there is no
    /// retry from here.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`PaymentError`] with the cart untouched.
    pub fn settle<S, G, N>(
        self,
        cart: &mut CartSession<S>,
        gateway: &G,
        navigator: &mut N,
    ) -> Result<(), PaymentError>
    where
        S: StorageSlot,
        G: PaymentGateway,
        N: Navigator,
    {
        gateway.authorize(&self.step.order)?;

        cart.clear();
        info!(total = %self.total, "order settled");
        navigator.navigate(CONFIRMATION_PATH);

        Ok(())
    }

    /// Abandon the attempt before settlement. The cart is untouched and the
    /// draft, billing details included, is discarded. Dropping the machine
    /// without calling this has the same effect.
    pub fn abandon(self) {}
}
