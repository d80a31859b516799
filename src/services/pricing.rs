use rust_decimal::Decimal;

use crate::models::{OrderItemData, OrderTotals};

/// Computes order totals from line-item snapshots: each line contributes
/// `price * quantity` to the subtotal and `discount * quantity` to the
/// discount, and `total = subtotal - discount`. The subtraction is literal:
/// if discounts ever exceed the subtotal the total goes negative. Whether
/// to floor it at zero is a product decision that has not been made, so the
/// arithmetic is left untouched here.
pub fn compute_totals(items: &[OrderItemData]) -> OrderTotals {
    let mut subtotal = Decimal::ZERO;
    let mut discount = Decimal::ZERO;

    for item in items {
        let quantity = Decimal::from(item.quantity);
        subtotal += item.price * quantity;
        discount += item.discount * quantity;
    }

    OrderTotals {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i32, price: i64, discount: i64, quantity: i32) -> OrderItemData {
        OrderItemData {
            product_id,
            quantity,
            price: Decimal::from(price),
            discount: Decimal::from(discount),
        }
    }

    #[test]
    fn totals_follow_the_line_arithmetic() {
        // 100/10 x2 plus 50/0 x1 => 250 gross, 20 off, 230 due
        let items = vec![line(1, 100, 10, 2), line(2, 50, 0, 1)];

        let totals = compute_totals(&items);

        assert_eq!(totals.subtotal, Decimal::from(250));
        assert_eq!(totals.discount, Decimal::from(20));
        assert_eq!(totals.total, Decimal::from(230));
    }

    #[test]
    fn empty_item_list_prices_to_zero() {
        let totals = compute_totals(&[]);

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.discount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn quantity_scales_both_price_and_discount() {
        let totals = compute_totals(&[line(7, 20, 3, 5)]);

        assert_eq!(totals.subtotal, Decimal::from(100));
        assert_eq!(totals.discount, Decimal::from(15));
        assert_eq!(totals.total, Decimal::from(85));
    }

    #[test]
    fn total_is_not_clamped_when_discounts_exceed_subtotal() {
        // Not producible through the catalog (discount <= price there), but
        // the arithmetic itself must stay literal.
        let totals = compute_totals(&[line(1, 10, 25, 1)]);

        assert_eq!(totals.total, Decimal::from(-15));
    }

    #[test]
    fn fractional_prices_are_exact() {
        let items = vec![OrderItemData {
            product_id: 1,
            quantity: 3,
            price: Decimal::new(1999, 2),   // 19.99
            discount: Decimal::new(50, 2),  // 0.50
        }];

        let totals = compute_totals(&items);

        assert_eq!(totals.subtotal, Decimal::new(5997, 2));
        assert_eq!(totals.discount, Decimal::new(150, 2));
        assert_eq!(totals.total, Decimal::new(5847, 2));
    }
}
