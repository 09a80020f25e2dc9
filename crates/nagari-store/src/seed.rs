//! Sample data for a fresh installation.
//!
//! Seeding is idempotent: the admin, profile, jorongs, and per-jorong 2024
//! statistics are matched by natural key and only created when missing;
//! news, FAQ, and Wali Nagari samples are only inserted into empty tables.

use rusqlite::Connection;
use tracing::info;

use nagari_core::{
    FaqCreateParams, JorongCreateParams, NewsCreateParams, ProfileUpdateParams,
    StatisticCreateParams, WaliNagariCreateParams,
};

use crate::errors::Result;
use crate::repository::Repository;

/// Username of the seeded administrator.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

const SEED_YEAR: i32 = 2024;

const JORONG_NAMES: [&str; 10] = [
    "Jorong Satu",
    "Jorong Dua",
    "Jorong Tiga",
    "Jorong Empat",
    "Jorong Lima",
    "Jorong Enam",
    "Jorong Tujuh",
    "Jorong Delapan",
    "Jorong Sembilan",
    "Jorong Sepuluh",
];

/// What a seeding run inserted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Whether the default admin was created.
    pub admin_created: bool,
    /// Whether the profile was created.
    pub profile_created: bool,
    /// Jorongs created.
    pub jorongs: usize,
    /// Statistics records created.
    pub statistics: usize,
    /// News articles created.
    pub news: usize,
    /// FAQ entries created.
    pub faqs: usize,
    /// Wali Nagari records created.
    pub wali_nagari: usize,
}

/// Insert the sample data set. `admin_password_hash` is stored for the
/// default admin if it does not exist yet.
pub fn seed(conn: &Connection, admin_password_hash: &str) -> Result<SeedReport> {
    let tx = conn.unchecked_transaction()?;
    let mut report = SeedReport::default();

    if Repository::find_admin_by_username(&tx, DEFAULT_ADMIN_USERNAME)?.is_none() {
        let _ = Repository::create_admin(
            &tx,
            DEFAULT_ADMIN_USERNAME,
            "Administrator Nagari",
            admin_password_hash,
        )?;
        report.admin_created = true;
    }

    if Repository::get_profile(&tx)?.is_none() {
        let _ = Repository::upsert_profile(&tx, &sample_profile())?;
        report.profile_created = true;
    }

    for (i, name) in (1u32..).zip(JORONG_NAMES) {
        let jorong = if let Some(existing) = Repository::find_jorong_by_name(&tx, name)? {
            existing
        } else {
            report.jorongs += 1;
            Repository::create_jorong(
                &tx,
                &JorongCreateParams {
                    name: name.to_string(),
                    description: format!("Deskripsi untuk {name}"),
                    area: Some(f64::from(i % 10 + 1)),
                    population: Some(500 + i * 137),
                    kepala_jorong: Some(format!("Kepala {name}")),
                },
            )?
        };

        if Repository::find_statistic(&tx, &jorong.id, SEED_YEAR)?.is_none() {
            let _ = Repository::create_statistic(&tx, &sample_statistic(&jorong.id, jorong.population))?;
            report.statistics += 1;
        }
    }

    if Repository::list_news(&tx, nagari_core::Visibility::All)?.is_empty() {
        for i in 1..=5 {
            let _ = Repository::create_news(
                &tx,
                &NewsCreateParams {
                    title: format!("Berita Contoh {i}"),
                    content: format!(
                        "<p>Ini adalah konten berita contoh ke-{i}. Lorem ipsum dolor sit amet.</p>"
                    ),
                    excerpt: Some(format!("Ringkasan berita contoh ke-{i}")),
                    tags: Some("berita,nagari,contoh".to_string()),
                    ..Default::default()
                },
            )?;
            report.news += 1;
        }
    }

    if Repository::list_faqs(&tx, nagari_core::Visibility::All, None)?.is_empty() {
        for (order, (question, answer, category)) in (1i64..).zip(SAMPLE_FAQS) {
            let _ = Repository::create_faq(
                &tx,
                &FaqCreateParams {
                    question: question.to_string(),
                    answer: answer.to_string(),
                    category: Some(category.to_string()),
                    order: Some(order),
                    published: Some(true),
                },
            )?;
            report.faqs += 1;
        }
    }

    if Repository::list_wali_nagari(&tx)?.is_empty() {
        for (order, (name, start, end, biography)) in (1i64..).zip(SAMPLE_WALI) {
            let _ = Repository::create_wali_nagari(
                &tx,
                &WaliNagariCreateParams {
                    name: name.to_string(),
                    start_year: start,
                    end_year: end,
                    order,
                    biography: Some(biography.to_string()),
                    ..Default::default()
                },
            )?;
            report.wali_nagari += 1;
        }
    }

    tx.commit()?;
    info!(?report, "seed complete");
    Ok(report)
}

/// 2024 figures split 52/48 by gender, 25/65/10 by age, one household per four residents.
fn sample_statistic(jorong_id: &str, population: u32) -> StatisticCreateParams {
    let share = |pct: u32| population * pct / 100;
    StatisticCreateParams {
        jorong_id: jorong_id.to_string(),
        year: SEED_YEAR,
        population,
        male_count: share(52),
        female_count: share(48),
        child_count: Some(share(25)),
        adult_count: Some(share(65)),
        elderly_count: Some(share(10)),
        households: Some(population / 4),
    }
}

fn sample_profile() -> ProfileUpdateParams {
    ProfileUpdateParams {
        name: Some("Nagari Contoh".into()),
        description: Some(
            "Nagari yang terletak di Sumatera Barat dengan keindahan alam dan budaya yang kaya."
                .into(),
        ),
        history: Some("Nagari ini memiliki sejarah panjang sejak zaman kolonial.".into()),
        vision: Some("Menjadi Nagari yang maju, sejahtera, dan berbudaya.".into()),
        mission: Some(
            "Meningkatkan kesejahteraan masyarakat melalui pembangunan berkelanjutan.".into(),
        ),
        address: Some("Jl. Raya Nagari, Sumatera Barat".into()),
        phone: Some("(0751) 123456".into()),
        email: Some("info@nagari.sumbar.go.id".into()),
        latitude: Some(-0.9471),
        longitude: Some(100.4172),
        ..Default::default()
    }
}

const SAMPLE_FAQS: [(&str, &str, &str); 3] = [
    (
        "Bagaimana cara mengurus surat keterangan domisili?",
        "Datang langsung ke kantor Nagari dengan membawa KTP dan dokumen pendukung lainnya.",
        "pelayanan",
    ),
    (
        "Kapan jadwal pelayanan kantor Nagari?",
        "Kantor Nagari buka setiap hari Senin-Jumat pukul 08.00-16.00 WIB.",
        "umum",
    ),
    (
        "Apa saja tradisi budaya yang ada di Nagari ini?",
        "Upacara adat, tarian tradisional, dan festival tahunan.",
        "adat",
    ),
];

const SAMPLE_WALI: [(&str, i32, Option<i32>, &str); 3] = [
    ("Pak Satu", 2010, Some(2016), "Wali Nagari pertama yang memimpin dengan dedikasi tinggi."),
    ("Pak Dua", 2016, Some(2022), "Melanjutkan pembangunan dan modernisasi Nagari."),
    ("Pak Tiga", 2022, None, "Wali Nagari saat ini yang fokus pada digitalisasi."),
];
