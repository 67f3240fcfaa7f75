//! Hindi (Devanagari) pattern tables

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{ObligationStrength, Severity};

use super::{
    compile_all, modals, rule, vague, ChecklistItem, ModalFamily, QualityValidator, RiskSignature,
    VagueTerm,
};

const MONTHS: &str = "जनवरी|फ़रवरी|फरवरी|मार्च|अप्रैल|मई|जून|जुलाई|अगस्त|सितंबर|अक्टूबर|नवंबर|दिसंबर";

lazy_static! {
    pub(super) static ref SECTION_PATTERNS: Vec<Regex> = vec![
        // धारा 4 / अनुच्छेद 2
        Regex::new(r"(?:^|\n)\s*(?:धारा|अनुच्छेद|खंड|भाग)\s+(\d+)").unwrap(),
        Regex::new(r"(?:^|\n)\s*(\d+(?:\.\d+)*)\s*[\.:\)]\s*").unwrap(),
    ];

    pub(super) static ref RISK_SIGNATURES: Vec<RiskSignature> = vec![
        RiskSignature {
            risk_type: "unlimited_liability",
            severity: Severity::High,
            description: "असीमित दायित्व का खंड पाया गया",
            patterns: compile_all(&[
                r"असीमित\s+(?:दायित्व|जिम्मेदारी)",
                r"पूर्ण\s+(?:दायित्व|जिम्मेदारी)",
                r"बिना\s+(?:किसी\s+)?सीमा",
            ]),
        },
        RiskSignature {
            risk_type: "one_sided_termination",
            severity: Severity::High,
            description: "एकतरफा समाप्ति का खंड पाया गया",
            patterns: compile_all(&[
                r"(?:एकतरफा|एकपक्षीय)\s+(?:समाप्ति|रद्द)",
                r"बिना\s+(?:कारण|सूचना)\s+(?:समाप्त|रद्द)",
            ]),
        },
    ];

    pub(super) static ref QUALITY_VALIDATORS: Vec<QualityValidator> = vec![
        QualityValidator {
            clause_type: "termination",
            weight_factor: 0.6,
            checks: vec![
                rule("notice_defined", "सूचना अवधि परिभाषित", &[
                    r"सूचना\s+(?:अवधि|की\s+अवधि)",
                    r"\d+\s*(?:दिन|सप्ताह|महीने)\s*(?:की\s+)?(?:पूर्व\s+)?सूचना",
                ]),
                rule("mutual", "पारस्परिक अधिकार", &[
                    r"(?:दोनों|किसी\s+भी)\s+पक्ष",
                    r"पारस्परिक\s+(?:अधिकार|सहमति)",
                ]),
                rule("grounds", "समाप्ति के कारण निर्दिष्ट", &[
                    r"कारण\s+(?:से|के\s+(?:लिए|आधार\s+पर))",
                    r"(?:उल्लंघन|चूक|विफलता)",
                ]),
            ],
        },
        QualityValidator {
            clause_type: "liability",
            weight_factor: 0.5,
            checks: vec![rule("cap_defined", "दायित्व सीमा परिभाषित", &[
                r"(?:सीमा|अधिकतम)\s+(?:दायित्व|जिम्मेदारी)",
                r"(?:दायित्व|जिम्मेदारी)\s+(?:से\s+अधिक\s+नहीं|सीमित)",
            ])],
        },
        QualityValidator {
            clause_type: "confidentiality",
            weight_factor: 0.4,
            checks: vec![rule("duration", "गोपनीयता अवधि परिभाषित", &[
                r"(?:गोपनीयता\s+)?(?:अवधि|अवधि\s+के\s+लिए)",
                r"\d+\s*(?:वर्ष|महीने|साल)\s+(?:तक|के\s+लिए)",
            ])],
        },
    ];

    pub(super) static ref MODAL_FAMILIES: Vec<ModalFamily> = vec![
        modals(
            ObligationStrength::Mandatory,
            &["करेगा", "करेगी", "करेंगे", "होगा", "होगी", "अवश्य", "आवश्यक"],
        ),
        modals(ObligationStrength::Recommended, &["चाहिए", "अपेक्षित"]),
        modals(
            ObligationStrength::Optional,
            &["कर सकता", "सकता", "सकती", "सकते", "अनुमति"],
        ),
    ];

    pub(super) static ref VAGUE_TERMS: Vec<VagueTerm> = vague(&[
        "उचित",
        "यथोचित",
        "शीघ्र",
        "पर्याप्त",
        "उपयुक्त",
        "समयानुसार",
        "संतोषजनक",
        "आवश्यक",
        "सामान्य",
        "यथासंभव",
        "अपने विवेक से",
    ]);

    /// Passive markers; longer compound forms come first so they win on overlap
    pub(super) static ref PASSIVE_PATTERNS: Vec<Regex> = compile_all(&[
        r"\bकिया\s+जाना\s+चाहिए\b",
        r"\bकिया\s+जाएगा\b",
        r"\bकी\s+जाएगी\b",
        r"\bकिए\s+जाएंगे\b",
        r"\bदिया\s+जाएगा\b",
        r"\bदी\s+जाएगी\b",
        r"\bकिया\s+गया\b",
        r"\bकी\s+गई\b",
        r"\bगया\b",
        r"\bगई\b",
        r"\bगए\b",
    ]);

    pub(super) static ref DEADLINE_PATTERNS: Vec<Regex> = {
        let dated = format!(r"(\d{{1,2}}\s+(?:{})\s*,?\s*\d{{4}})\s+(?:तक|से\s+पहले)", MONTHS);
        compile_all(&[
            r"(\d+\s*(?:दिन|सप्ताह|महीने|महीना|वर्ष|साल))\s+के\s+भीतर",
            dated.as_str(),
        ])
    };

    pub(super) static ref CONDITION_PATTERNS: Vec<Regex> = compile_all(&[
        r"(?:बशर्ते(?:\s+कि)?|यदि|अगर)\s+(.+?)(?:।|,|;|$)",
    ]);
}

pub(super) const CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        clause_type: "termination",
        keywords: &["समाप्ति", "अवधि", "रद्द", "निरस्त"],
        weight: 10,
        description: "समाप्ति खंड – अनुबंध कैसे समाप्त किया जा सकता है",
    },
    ChecklistItem {
        clause_type: "liability",
        keywords: &["दायित्व", "जिम्मेदारी", "उत्तरदायित्व"],
        weight: 10,
        description: "दायित्व खंड – दायित्व सीमा और दायरे को परिभाषित करता है",
    },
    ChecklistItem {
        clause_type: "confidentiality",
        keywords: &["गोपनीयता", "गोपनीय", "गुप्त"],
        weight: 9,
        description: "गोपनीयता खंड – संवेदनशील जानकारी की रक्षा करता है",
    },
    ChecklistItem {
        clause_type: "dispute_resolution",
        keywords: &["विवाद", "मध्यस्थता", "समाधान", "न्यायालय"],
        weight: 9,
        description: "विवाद समाधान खंड – विवादों को कैसे संभाला जाता है",
    },
    ChecklistItem {
        clause_type: "payment_terms",
        keywords: &["भुगतान", "शुल्क", "मूल्य", "राशि", "पारिश्रमिक"],
        weight: 9,
        description: "भुगतान शर्तें – वित्तीय दायित्व और अनुसूचियां",
    },
];
