//! Property tests: random change sequences against a simple reference model.

use common::AggregateId;
use domain::{ErrorKind, Money, Order, ProductId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Line {
        product: usize,
        quantity: i64,
        cents: i64,
    },
    Discount {
        cents: i64,
    },
    Ship,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0usize..6, -2i64..8, 0i64..100_000).prop_map(|(product, quantity, cents)| Op::Line {
            product,
            quantity,
            cents,
        }),
        2 => (-500i64..5_000).prop_map(|cents| Op::Discount { cents }),
        1 => Just(Op::Ship),
    ]
}

/// Lines keyed by product slot, in insertion order.
#[derive(Default)]
struct Model {
    lines: Vec<(usize, i64, i64)>,
    discount_cents: i64,
    shipped: bool,
}

impl Model {
    fn total_cents(&self) -> i64 {
        self.lines.iter().map(|(_, q, c)| q * c).sum::<i64>() - self.discount_cents
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    })]

    /// Property: the order matches the model after every step, whatever the outcome.
    #[test]
    fn order_tracks_reference_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let products: Vec<ProductId> = (0..6).map(|_| ProductId::new()).collect();
        let mut order = Order::create(AggregateId::new());
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Line { product, quantity, cents } => {
                    let result = order.update_order_line(products[product], quantity, Money::from_cents(cents));
                    if model.shipped {
                        prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidState);
                    } else if quantity < 0 {
                        prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
                    } else if quantity == 0 {
                        prop_assert!(result.is_ok());
                        model.lines.retain(|(p, _, _)| *p != product);
                    } else {
                        prop_assert!(result.is_ok());
                        match model.lines.iter_mut().find(|(p, _, _)| *p == product) {
                            Some(line) => *line = (product, quantity, cents),
                            None => model.lines.push((product, quantity, cents)),
                        }
                    }
                }
                Op::Discount { cents } => {
                    let result = order.update_discount(Money::from_cents(cents));
                    if cents < 0 {
                        prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
                    } else if model.shipped {
                        prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidState);
                    } else {
                        prop_assert!(result.is_ok());
                        model.discount_cents = cents;
                    }
                }
                Op::Ship => {
                    let result = order.ship();
                    if model.shipped || model.lines.is_empty() {
                        prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidState);
                    } else {
                        prop_assert!(result.is_ok());
                        model.shipped = true;
                    }
                }
            }

            let actual: Vec<(ProductId, u32, Money)> = order
                .order_lines()
                .iter()
                .map(|l| (l.product_id(), l.quantity(), l.unit_price()))
                .collect();
            let expected: Vec<(ProductId, u32, Money)> = model
                .lines
                .iter()
                .map(|(p, q, c)| (products[*p], *q as u32, Money::from_cents(*c)))
                .collect();
            prop_assert_eq!(actual, expected);
            prop_assert_eq!(order.discount(), Money::from_cents(model.discount_cents));
            prop_assert_eq!(order.total_amount(), Money::from_cents(model.total_cents()));
            prop_assert_eq!(order.is_shipped(), model.shipped);
        }
    }

    /// Property: at most one line per product, each with a positive quantity.
    #[test]
    fn lines_stay_unique_and_positive(
        ops in prop::collection::vec((0usize..4, 0i64..5, 0i64..1_000), 0..60)
    ) {
        let products: Vec<ProductId> = (0..4).map(|_| ProductId::new()).collect();
        let mut order = Order::create(AggregateId::new());

        for (product, quantity, cents) in ops {
            order
                .update_order_line(products[product], quantity, Money::from_cents(cents))
                .unwrap();

            let lines = order.order_lines();
            for (i, line) in lines.iter().enumerate() {
                prop_assert!(line.quantity() > 0);
                prop_assert!(lines[i + 1..].iter().all(|other| other.product_id() != line.product_id()));
            }
        }
    }

    /// Property: total is Σ(unit_price × quantity) − discount, computed from the visible lines.
    #[test]
    fn total_matches_visible_lines(
        lines in prop::collection::vec((1i64..50, 0i64..1_000_000), 1..20),
        discount in 0i64..10_000
    ) {
        let mut order = Order::create(AggregateId::new());
        for (quantity, cents) in &lines {
            order
                .update_order_line(ProductId::new(), *quantity, Money::from_cents(*cents))
                .unwrap();
        }
        order.update_discount(Money::from_cents(discount)).unwrap();

        let recomputed = order
            .order_lines()
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
            - order.discount();
        prop_assert_eq!(order.total_amount(), recomputed);
        prop_assert_eq!(order.subtotal() - order.discount(), recomputed);
    }

    /// Property: a snapshot restores to an equivalent order.
    #[test]
    fn snapshot_restores_equivalent_order(
        lines in prop::collection::vec((1i64..50, 0i64..100_000), 0..10),
        discount in 0i64..1_000,
        ship in any::<bool>()
    ) {
        let mut order = Order::create(AggregateId::new());
        for (quantity, cents) in &lines {
            order
                .update_order_line(ProductId::new(), *quantity, Money::from_cents(*cents))
                .unwrap();
        }
        order.update_discount(Money::from_cents(discount)).unwrap();
        if ship && order.has_lines() {
            order.ship().unwrap();
        }

        let json = serde_json::to_string(&order).unwrap();
        let restored: Order = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored.snapshot(), order.snapshot());
    }
}
