use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use aqarna::portal::billing::{CostBreakdownItem, Invoice, InvoiceBook, InvoiceStatus, MonthlyRow};
use aqarna::portal::indicators::{NationalRow, PeriodKey, Region, UnionSite};
use aqarna::portal::objections::{
    Objection, ObjectionId, ObjectionRepository, ObjectionSource, ObjectionStatus,
    RepositoryError,
};
use aqarna::portal::union::{
    Announcement, Building, FeeTemplate, MaintenanceTask, Member, MemberStanding, Periodicity,
    TaskStatus, UnionDirectory,
};
use aqarna::storage::{KeyValueStore, StorageError};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryObjectionRepository {
    records: Arc<Mutex<HashMap<ObjectionId, Objection>>>,
    order: Arc<Mutex<Vec<ObjectionId>>>,
}

impl InMemoryObjectionRepository {
    pub(crate) fn seeded() -> Self {
        let repository = Self::default();
        for objection in seed_objections() {
            repository
                .insert(objection)
                .expect("seed ids are distinct");
        }
        repository
    }
}

impl ObjectionRepository for InMemoryObjectionRepository {
    fn insert(&self, objection: Objection) -> Result<Objection, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&objection.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(objection.id.clone(), objection.clone());
        self.order
            .lock()
            .expect("order mutex poisoned")
            .push(objection.id.clone());
        Ok(objection)
    }

    fn update(&self, objection: Objection) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&objection.id) {
            guard.insert(objection.id.clone(), objection);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ObjectionId) -> Result<Option<Objection>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Objection>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let order = self.order.lock().expect("order mutex poisoned");
        Ok(order.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }

    fn delete(&self, id: &ObjectionId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.remove(id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        self.order
            .lock()
            .expect("order mutex poisoned")
            .retain(|known| known != id);
        Ok(())
    }
}

/// Process-local stand-in for the browser's key-value storage.
#[derive(Default, Clone)]
pub(crate) struct InMemoryKeyValueStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().expect("store mutex poisoned").get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().expect("store mutex poisoned").remove(key);
        Ok(())
    }
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("seed dates are well formed")
}

fn month_key(raw: &str) -> PeriodKey {
    PeriodKey::parse(raw).expect("seed month keys are well formed")
}

#[allow(clippy::too_many_arguments)]
fn seeded_objection(
    id: &str,
    title: &str,
    filer: &str,
    union_name: &str,
    unit: Option<&str>,
    region: Region,
    source: ObjectionSource,
    status: ObjectionStatus,
    created: &str,
) -> Objection {
    Objection {
        id: ObjectionId(id.to_string()),
        title: title.to_string(),
        reason: String::new(),
        submitted_by: filer.to_string(),
        union_name: union_name.to_string(),
        unit: unit.map(str::to_string),
        region,
        source,
        status,
        created: date(created),
        invoice_id: None,
        category: None,
        impact: None,
        attachments: Vec::new(),
    }
}

/// Objections in flight across the demo unions.
pub(crate) fn seed_objections() -> Vec<Objection> {
    use ObjectionSource::{Member, Union};
    use ObjectionStatus::{Accepted, New, Rejected, UnderReview};

    vec![
        seeded_objection(
            "OBJ-22101",
            "مراجعة احتساب رسوم الحديقة",
            "اتحاد برج الندى",
            "اتحاد برج الندى",
            None,
            Region::Riyadh,
            Union,
            UnderReview,
            "2025-06-06",
        ),
        seeded_objection(
            "OBJ-22102",
            "ازدواجية فاتورة مايو",
            "اتحاد مجمع الروابي",
            "اتحاد مجمع الروابي",
            None,
            Region::Riyadh,
            Union,
            New,
            "2025-05-28",
        ),
        seeded_objection(
            "OBJ-22103",
            "رسوم صيانة مبالغ فيها",
            "اتحاد برج الأعمال",
            "اتحاد برج الأعمال",
            None,
            Region::Makkah,
            Union,
            Accepted,
            "2025-05-21",
        ),
        seeded_objection(
            "OBJ-22104",
            "مطالبة متأخرة غير دقيقة",
            "اتحاد برج اليسر",
            "اتحاد برج اليسر",
            None,
            Region::Eastern,
            Union,
            Rejected,
            "2025-06-01",
        ),
        seeded_objection(
            "OBJ-22105",
            "إلغاء خدمة لم تُستخدم",
            "اتحاد حي النور",
            "اتحاد حي النور",
            None,
            Region::Madinah,
            Union,
            UnderReview,
            "2025-06-04",
        ),
        seeded_objection(
            "OBJ-22106",
            "خطأ في ربط الوحدة",
            "اتحاد تلال القصيم",
            "اتحاد تلال القصيم",
            None,
            Region::Qassim,
            Union,
            New,
            "2025-06-05",
        ),
        seeded_objection(
            "OBJ-2203",
            "رسوم مكررة أغسطس",
            "فهد السلمي",
            "اتحاد برج الندى",
            Some("B-08"),
            Region::Riyadh,
            Member,
            Accepted,
            "2025-09-02",
        ),
        seeded_objection(
            "OBJ-2210",
            "تأخير في تحديث الرصيد",
            "رانيم أحمد",
            "اتحاد برج الندى",
            Some("A-12"),
            Region::Riyadh,
            Member,
            UnderReview,
            "2025-09-12",
        ),
    ]
}

fn national_row(
    month: &str,
    region: Region,
    satisfaction: u32,
    payment: u32,
    open: u32,
    compliance: u32,
) -> NationalRow {
    NationalRow {
        month: month_key(month),
        region,
        owner_satisfaction: satisfaction,
        payment_rate: payment,
        objections_open: open,
        compliance_rate: compliance,
    }
}

/// Q2 2025 readings across the reporting regions.
pub(crate) fn seed_national_rows() -> Vec<NationalRow> {
    vec![
        national_row("2025-04", Region::Riyadh, 82, 87, 98, 91),
        national_row("2025-05", Region::Riyadh, 83, 88, 96, 92),
        national_row("2025-06", Region::Riyadh, 82, 87, 100, 92),
        national_row("2025-04", Region::Eastern, 78, 83, 64, 88),
        national_row("2025-05", Region::Eastern, 79, 84, 63, 88),
        national_row("2025-06", Region::Eastern, 79, 84, 61, 89),
        national_row("2025-04", Region::Makkah, 75, 81, 90, 85),
        national_row("2025-05", Region::Makkah, 76, 81, 89, 86),
        national_row("2025-06", Region::Makkah, 77, 82, 88, 86),
        national_row("2025-04", Region::Madinah, 80, 84, 45, 90),
        national_row("2025-05", Region::Madinah, 81, 85, 44, 90),
        national_row("2025-06", Region::Madinah, 81, 85, 43, 91),
        national_row("2025-04", Region::Qassim, 79, 83, 32, 88),
        national_row("2025-05", Region::Qassim, 79, 84, 30, 88),
        national_row("2025-06", Region::Qassim, 80, 85, 28, 89),
    ]
}

pub(crate) fn seed_union_sites() -> Vec<UnionSite> {
    let site = |name: &str, region, units, open, satisfaction, collection| UnionSite {
        name: name.to_string(),
        region,
        units,
        open_objections: open,
        satisfaction,
        collection,
    };

    vec![
        site("اتحاد برج الندى", Region::Riyadh, 96, 3, 84, 88),
        site("اتحاد مجمع الروابي", Region::Riyadh, 64, 1, 82, 87),
        site("اتحاد برج الأعمال", Region::Makkah, 120, 2, 77, 82),
        site("اتحاد برج اليسر", Region::Eastern, 80, 1, 79, 84),
        site("اتحاد حي النور", Region::Madinah, 52, 1, 81, 85),
        site("اتحاد تلال القصيم", Region::Qassim, 44, 1, 80, 85),
    ]
}

/// The sample owner's fee ledger for the current year.
pub(crate) fn seed_monthly_rows() -> Vec<MonthlyRow> {
    let row = |period: &str, charges, paid| MonthlyRow::derived(period, charges, paid);
    vec![
        row("يناير", 1800, 1800),
        row("فبراير", 1800, 1800),
        row("مارس", 1800, 1800),
        row("ابريل", 2220, 2220),
        row("ماي", 1800, 1800),
        row("يونيو", 1800, 1800),
        row("يوليو", 1800, 1800),
        row("اغسطس", 1800, 1620),
        row("سبتمبر", 1800, 0),
        row("اكتوبر", 1380, 0),
        row("نوفمبر", 1800, 0),
        row("ديسمبر", 1800, 0),
    ]
}

/// Where the sample owner's fees went this period.
pub(crate) fn seed_cost_breakdown() -> Vec<CostBreakdownItem> {
    let item = |label: &str, amount| CostBreakdownItem {
        label: label.to_string(),
        amount,
    };
    vec![
        item("صيانة كهرباء", 520),
        item("تشغيل مصاعد", 320),
        item("نظافة المرافق", 260),
        item("أمن وحراسة", 180),
        item("حدائق ومناظر", 100),
    ]
}

pub(crate) fn seed_invoice_book() -> InvoiceBook {
    let invoice = |id: &str, period: &str, total, status, due: &str| Invoice {
        id: id.to_string(),
        period: period.to_string(),
        total,
        status,
        due: date(due),
    };

    InvoiceBook::new(vec![
        invoice("INV-240113", "Q3 2025", 1380, InvoiceStatus::Unpaid, "2025-10-15"),
        invoice("INV-240071", "Q2 2025", 1800, InvoiceStatus::Paid, "2025-07-15"),
        invoice("INV-239999", "Q1 2025", 2220, InvoiceStatus::Paid, "2025-04-15"),
    ])
}

/// Working set for the demo association.
pub(crate) fn seed_union_directory() -> UnionDirectory {
    let member = |id: &str, name: &str, unit: &str, phone: &str, email: &str, standing| Member {
        id: id.to_string(),
        name: name.to_string(),
        unit: unit.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        standing,
    };
    let building = |id: &str, name: &str, units, occupied| Building {
        id: id.to_string(),
        name: name.to_string(),
        city: "الرياض".to_string(),
        units,
        occupied,
    };
    let fee = |id: &str, title: &str, periodicity, amount, active| FeeTemplate {
        id: id.to_string(),
        title: title.to_string(),
        periodicity,
        amount,
        active,
    };

    UnionDirectory::new(
        vec![
            member(
                "M-1001",
                "رانيم أحمد",
                "A-12",
                "0553816630",
                "raneem@example.com",
                MemberStanding::Active,
            ),
            member(
                "M-1002",
                "فهد السلمي",
                "B-08",
                "0555555555",
                "fahad@example.com",
                MemberStanding::Late,
            ),
            member(
                "M-1003",
                "أمل الدوسري",
                "C-03",
                "0552222222",
                "amal@example.com",
                MemberStanding::Active,
            ),
        ],
        vec![
            building("B-1", "برج الندى", 48, 44),
            building("B-2", "برج اليسر", 32, 30),
            building("B-3", "مجمع الروابي", 48, 41),
        ],
        vec![
            fee("F-01", "رسوم الخدمات المشتركة", Periodicity::Monthly, 450, true),
            fee("F-02", "صيانة المصاعد", Periodicity::Quarterly, 300, true),
            fee("F-03", "مواقف السيارات", Periodicity::Yearly, 900, false),
        ],
        vec![
            Announcement {
                id: "AN-120".to_string(),
                title: "تنبيه صيانة مصاعد".to_string(),
                body: "ستجري صيانة للمصاعد يوم السبت من 9ص حتى 1م.".to_string(),
                date: date("2025-09-10"),
                pinned: true,
            },
            Announcement {
                id: "AN-121".to_string(),
                title: "رش مبيدات".to_string(),
                body: "سيتم رش مبيدات في الحدائق الساعة 5م يوم الثلاثاء.".to_string(),
                date: date("2025-09-08"),
                pinned: false,
            },
        ],
        vec![
            MaintenanceTask {
                id: "T-01".to_string(),
                title: "استبدال إنارة الممرات - برج الندى".to_string(),
                assignee: Some("الفني: مازن".to_string()),
                status: TaskStatus::InProgress,
            },
            MaintenanceTask {
                id: "T-02".to_string(),
                title: "تسريب خزان المياه - مجمع الروابي".to_string(),
                assignee: Some("شركة الصيانة".to_string()),
                status: TaskStatus::Open,
            },
            MaintenanceTask {
                id: "T-03".to_string(),
                title: "تركيب حساسات دخان إضافية".to_string(),
                assignee: Some("الفني: علي".to_string()),
                status: TaskStatus::Done,
            },
        ],
    )
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
