pub mod card_product;
pub mod phone_card;
