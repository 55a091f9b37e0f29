// ==========================================
// WEWORKS 수지분석 - 제품 집계 엔진
// ==========================================
// 입력: 제품계획 행 목록 (+ 자사/타사 필터)
// 출력: 소계/합계, 마진, 할인율, 마진율
// 원칙: 합계의 비율은 부문별 비율 평균이 아니라 합산값에서 다시 계산한다.
// ==========================================

use crate::domain::product::ProductPlanItem;
use crate::domain::profitability::ProductSubtotal;
use crate::domain::types::ProductType;

// ==========================================
// ProductAggregator - 제품 집계
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductAggregator;

impl ProductAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 자사/타사 소계
    ///
    /// 기준가는 저장된 값 대신 수량 × 단가에서 다시 구한다.
    pub fn subtotal(&self, items: &[ProductPlanItem], product_type: ProductType) -> ProductSubtotal {
        let mut subtotal = items
            .iter()
            .filter(|item| item.product_type == product_type)
            .fold(ProductSubtotal::default(), |mut acc, item| {
                acc.quantity += item.quantity.unwrap_or(0.0);
                acc.unit_price += item.unit_price.unwrap_or(0.0);
                acc.base += item.computed_base_price();
                acc.proposal += item.proposal_price.unwrap_or(0.0);
                acc.cost += item.cost_price.unwrap_or(0.0);
                acc.contract_cost += item.contract_cost_price.unwrap_or(0.0);
                acc
            });

        derive_rates(&mut subtotal);
        subtotal
    }

    /// 자사 + 타사 합계
    pub fn total(&self, items: &[ProductPlanItem]) -> ProductSubtotal {
        let own = self.subtotal(items, ProductType::SelfSupplied);
        let other = self.subtotal(items, ProductType::ThirdParty);

        let mut total = ProductSubtotal {
            quantity: own.quantity + other.quantity,
            unit_price: own.unit_price + other.unit_price,
            base: own.base + other.base,
            proposal: own.proposal + other.proposal,
            cost: own.cost + other.cost,
            contract_cost: own.contract_cost + other.contract_cost,
            ..Default::default()
        };

        derive_rates(&mut total);
        total
    }
}

/// 마진/할인율/마진율 파생
fn derive_rates(subtotal: &mut ProductSubtotal) {
    subtotal.margin = subtotal.proposal - subtotal.cost;
    subtotal.contract_margin = subtotal.proposal - subtotal.contract_cost;
    subtotal.discount_rate = if subtotal.base > 0.0 {
        (subtotal.base - subtotal.proposal) / subtotal.base * 100.0
    } else {
        0.0
    };
    subtotal.margin_rate = if subtotal.proposal > 0.0 {
        subtotal.margin / subtotal.proposal * 100.0
    } else {
        0.0
    };
}

/// 자사/타사 소계
pub fn aggregate_product(items: &[ProductPlanItem], product_type: ProductType) -> ProductSubtotal {
    ProductAggregator::new().subtotal(items, product_type)
}

/// 자사 + 타사 합계
pub fn aggregate_product_total(items: &[ProductPlanItem]) -> ProductSubtotal {
    ProductAggregator::new().total(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_discount_rate_scenario() {
        let items = vec![
            ProductPlanItem::new(ProductType::SelfSupplied, 10.0, 100.0).with_proposal_price(900.0),
        ];

        let sub = aggregate_product(&items, ProductType::SelfSupplied);
        assert_eq!(sub.base, 1000.0);
        assert_eq!(sub.proposal, 900.0);
        assert!(approx(sub.discount_rate, 10.0));
    }

    #[test]
    fn test_margin_and_contract_margin() {
        let mut item = ProductPlanItem::new(ProductType::ThirdParty, 1.0, 1000.0)
            .with_proposal_price(1000.0)
            .with_cost_price(700.0);
        item.contract_cost_price = Some(650.0);

        let sub = aggregate_product(&[item], ProductType::ThirdParty);
        assert_eq!(sub.margin, 300.0);
        assert_eq!(sub.contract_margin, 350.0);
        assert!(approx(sub.margin_rate, 30.0));
    }

    #[test]
    fn test_type_filter() {
        let items = vec![
            ProductPlanItem::new(ProductType::SelfSupplied, 1.0, 100.0).with_proposal_price(100.0),
            ProductPlanItem::new(ProductType::ThirdParty, 1.0, 200.0).with_proposal_price(150.0),
        ];

        assert_eq!(aggregate_product(&items, ProductType::SelfSupplied).proposal, 100.0);
        assert_eq!(aggregate_product(&items, ProductType::ThirdParty).proposal, 150.0);
    }

    #[test]
    fn test_total_rederives_rates_from_combined_sums() {
        let items = vec![
            // 자사: 기준 1000, 제안 900 → 10%
            ProductPlanItem::new(ProductType::SelfSupplied, 10.0, 100.0).with_proposal_price(900.0),
            // 타사: 기준 3000, 제안 1500 → 50%
            ProductPlanItem::new(ProductType::ThirdParty, 3.0, 1000.0).with_proposal_price(1500.0),
        ];

        let total = aggregate_product_total(&items);
        assert_eq!(total.base, 4000.0);
        assert_eq!(total.proposal, 2400.0);
        // (4000 - 2400) / 4000 = 40%, 부문 평균(30%)이 아님
        assert!(approx(total.discount_rate, 40.0));
    }

    #[test]
    fn test_zero_base_and_zero_proposal() {
        let mut item = ProductPlanItem::empty(1, ProductType::SelfSupplied);
        item.cost_price = Some(100.0);

        let sub = aggregate_product(&[item], ProductType::SelfSupplied);
        assert_eq!(sub.discount_rate, 0.0);
        assert_eq!(sub.margin_rate, 0.0);
        assert_eq!(sub.margin, -100.0);
    }

    #[test]
    fn test_payload_without_base_price() {
        let items: Vec<ProductPlanItem> = serde_json::from_value(serde_json::json!([
            {"type": "자사", "quantity": 10, "unitPrice": 100, "proposalPrice": 900},
            {"type": "자사", "quantity": 1, "unitPrice": 500, "basePrice": 99999}
        ]))
        .unwrap();

        let sub = aggregate_product(&items, ProductType::SelfSupplied);
        assert_eq!(sub.base, 1500.0);
        assert!(approx(sub.discount_rate, 40.0));
    }

    #[test]
    fn test_unclassified_rows_excluded() {
        let items: Vec<ProductPlanItem> = serde_json::from_value(serde_json::json!([
            {"quantity": 1, "unitPrice": 700, "proposalPrice": 700},
            {"type": "", "quantity": 1, "unitPrice": 300, "proposalPrice": 300},
            {"type": "타사", "quantity": 1, "unitPrice": 200, "proposalPrice": 150}
        ]))
        .unwrap();

        assert_eq!(items[0].product_type, ProductType::default());
        let total = aggregate_product_total(&items);
        assert_eq!(total.proposal, 150.0);
        assert_eq!(total.base, 200.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate_product_total(&[]), ProductSubtotal::default());
    }
}
