// ==========================================
// WEWORKS 수지분석 - 제품계획 도메인 모델
// ==========================================
// 기준가 = round(수량 × 단가)
// 할인율 = (기준가 - 제안가) / 기준가 × 100  (기준가 0 또는 제안가 없음 → 0)
// 매입 원가 수정 시 구매 계약 원가를 같은 값으로 맞춘다.
// ==========================================

use crate::domain::numeric::{lenient_f64, lenient_label, lenient_opt_f64, round_half_up};
use crate::domain::types::{ProductType, RequestType};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductPlanItem - 제품계획 행
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPlanItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default, rename = "type", deserialize_with = "lenient_label")]
    pub product_type: ProductType,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub product_name: String,

    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub unit_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub base_price: f64, // 기준가 (파생)
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub proposal_price: Option<f64>, // 제안가
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub cost_price: Option<f64>, // 매입 원가
    #[serde(default, deserialize_with = "lenient_f64")]
    pub discount_rate: f64, // 할인율 % (파생)

    #[serde(default)]
    pub request_date: String,
    #[serde(default)]
    pub request_type: RequestType,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub contract_cost_price: Option<f64>, // 구매 계약 원가
}

// ==========================================
// ProductEdit - 행 편집 명령
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ProductEdit {
    ProductType(ProductType),
    CompanyName(String),
    ProductName(String),
    Quantity(Option<f64>),
    UnitPrice(Option<f64>),
    ProposalPrice(Option<f64>),
    CostPrice(Option<f64>),
    ContractCostPrice(Option<f64>),
    RequestDate(String),
    RequestType(RequestType),
}

// ==========================================
// ProductMasterItem - 제품 마스터
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMasterItem {
    pub id: i64,
    pub company_name: String,
    pub product_name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ProductPlanItem {
    /// 새 제품계획 행 생성 (기준가 계산 포함)
    pub fn new(product_type: ProductType, quantity: f64, unit_price: f64) -> Self {
        let mut item = Self::empty(0, product_type);
        item.quantity = Some(quantity);
        item.unit_price = Some(unit_price);
        item.recalculate();
        item
    }

    /// 빈 행 (수량 1)
    pub fn empty(id: i64, product_type: ProductType) -> Self {
        Self {
            id,
            product_type,
            product_id: None,
            company_name: String::new(),
            product_name: String::new(),
            quantity: Some(1.0),
            unit_price: None,
            base_price: 0.0,
            proposal_price: None,
            cost_price: None,
            discount_rate: 0.0,
            request_date: String::new(),
            request_type: RequestType::None,
            contract_cost_price: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_proposal_price(mut self, price: f64) -> Self {
        self.apply_edit(ProductEdit::ProposalPrice(Some(price)));
        self
    }

    pub fn with_cost_price(mut self, price: f64) -> Self {
        self.apply_edit(ProductEdit::CostPrice(Some(price)));
        self
    }

    /// 편집 적용 후 파생 필드 재계산
    pub fn apply_edit(&mut self, edit: ProductEdit) {
        match edit {
            ProductEdit::ProductType(t) => self.product_type = t,
            ProductEdit::CompanyName(v) => self.company_name = v,
            ProductEdit::ProductName(v) => self.product_name = v,
            ProductEdit::Quantity(v) => self.quantity = v,
            ProductEdit::UnitPrice(v) => self.unit_price = v,
            ProductEdit::ProposalPrice(v) => self.proposal_price = v,
            ProductEdit::CostPrice(v) => {
                self.cost_price = v;
                self.contract_cost_price = v;
            }
            ProductEdit::ContractCostPrice(v) => self.contract_cost_price = v,
            ProductEdit::RequestDate(v) => self.request_date = v,
            ProductEdit::RequestType(v) => self.request_type = v,
        }
        self.recalculate();
    }

    /// 제품 마스터 선택 시 정보 채우기
    pub fn apply_master(&mut self, master: &ProductMasterItem) {
        self.product_id = Some(master.id);
        self.company_name = master.company_name.clone();
        self.product_name = master.product_name.clone();
        self.unit_price = Some(master.unit_price);
        self.recalculate();
    }

    /// 기준가/할인율 재계산
    pub fn recalculate(&mut self) {
        self.base_price = self.computed_base_price();
        self.discount_rate = match self.proposal_price {
            Some(proposal) if self.base_price > 0.0 => {
                (self.base_price - proposal) / self.base_price * 100.0
            }
            _ => 0.0,
        };
    }

    /// round(수량 × 단가), 수량·단가 중 하나라도 0/없음이면 0
    pub fn computed_base_price(&self) -> f64 {
        let quantity = self.quantity.unwrap_or(0.0);
        let unit_price = self.unit_price.unwrap_or(0.0);
        if quantity == 0.0 || unit_price == 0.0 {
            0.0
        } else {
            round_half_up(quantity * unit_price)
        }
    }
}
