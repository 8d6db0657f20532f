//! Example complaints for an empty dashboard.

use crate::complaint::{ComplaintCategory, NewComplaint};

/// The demo complaints created on first start, in creation order.
pub fn default_fixtures() -> Vec<NewComplaint> {
    vec![
        NewComplaint {
            ca_number: "112233445566".to_string(),
            full_name: "สมชาย ใจดี".to_string(),
            phone: "0812345678".to_string(),
            category: ComplaintCategory::PowerOutage,
            description: "ไฟฟ้าดับทั้งซอยมา 1 ชั่วโมงแล้ว".to_string(),
            photo: None,
            location: "123 ถนนสุขุมวิท, กรุงเทพฯ".to_string(),
        },
        NewComplaint {
            ca_number: "223344556677".to_string(),
            full_name: "สมหญิง มีสุข".to_string(),
            phone: "0823456789".to_string(),
            category: ComplaintCategory::HighVoltage,
            description: "สายไฟแรงสูงพาดลงมาใกล้หลังคาบ้าน อันตรายมาก".to_string(),
            photo: None,
            location: "456 ถนนเพชรบุรี, กรุงเทพฯ".to_string(),
        },
        NewComplaint {
            ca_number: "334455667788".to_string(),
            full_name: "มานะ อดทน".to_string(),
            phone: "0834567890".to_string(),
            category: ComplaintCategory::Billing,
            description: "ค่าไฟเดือนนี้สูงผิดปกติ ทั้งที่ใช้ไฟเท่าเดิม".to_string(),
            photo: None,
            location: "789 ถนนพระราม 4, กรุงเทพฯ".to_string(),
        },
    ]
}
