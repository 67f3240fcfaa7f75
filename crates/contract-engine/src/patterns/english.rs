//! English pattern tables

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{ObligationStrength, Severity};

use super::{
    compile_all, modals, rule, vague, ChecklistItem, ModalFamily, QualityValidator, RiskPrototype,
    RiskSignature, VagueTerm,
};

lazy_static! {
    pub(super) static ref SECTION_PATTERNS: Vec<Regex> = vec![
        // 1. / 1.1 / 1.1.2)
        Regex::new(r"(?:^|\n)\s*(\d+(?:\.\d+)*)\s*[\.:\)]\s*").unwrap(),
        // (a) / (iv)
        Regex::new(r"(?:^|\n)\s*\(([a-z]+|[ivxlc]+)\)\s*").unwrap(),
        Regex::new(r"(?:^|\n)\s*(?:Section|Article|Clause|Part|Schedule)\s+(\d+[A-Za-z]*)").unwrap(),
        // II. / IV)
        Regex::new(r"(?:^|\n)\s*([IVXLC]+)\s*[\.:\)]\s*").unwrap(),
    ];

    pub(super) static ref RISK_SIGNATURES: Vec<RiskSignature> = vec![
        RiskSignature {
            risk_type: "unlimited_liability",
            severity: Severity::High,
            description: "Unlimited or uncapped liability clause detected",
            patterns: compile_all(&[
                r"unlimited\s+liability",
                r"liable\s+for\s+all\s+(?:damages|losses)",
                r"no\s+(?:cap|limit|limitation)\s+(?:on|to)\s+(?:liability|damages)",
                r"full\s+(?:and\s+complete\s+)?liability",
                r"indemnify\s+(?:and\s+hold\s+harmless\s+)?(?:against\s+)?all",
                r"without\s+(?:any\s+)?limit(?:ation)?",
            ]),
        },
        RiskSignature {
            risk_type: "one_sided_termination",
            severity: Severity::High,
            description: "One-sided or at-will termination clause detected",
            patterns: compile_all(&[
                r"(?:may|can|shall)\s+terminate\s+(?:this\s+)?(?:agreement|contract)\s+(?:at\s+)?(?:any\s+time|without\s+(?:cause|reason|notice))",
                r"sole\s+(?:and\s+absolute\s+)?discretion\s+to\s+terminate",
                r"unilateral(?:ly)?\s+terminat",
                r"terminate\s+without\s+(?:prior\s+)?(?:notice|cause|reason)",
                r"right\s+to\s+terminate\s+(?:at\s+will|immediately)",
            ]),
        },
        RiskSignature {
            risk_type: "missing_notice_period",
            severity: Severity::High,
            description: "Missing or waived notice period for termination",
            patterns: compile_all(&[
                r"terminat\w+\s+(?:without|with\s+no)\s+(?:prior\s+)?notice",
                r"immediate(?:ly)?\s+terminat",
                r"no\s+(?:prior\s+)?notice\s+(?:is\s+)?required",
                r"without\s+(?:any\s+)?advance\s+notice",
            ]),
        },
        RiskSignature {
            risk_type: "auto_renewal",
            severity: Severity::Medium,
            description: "Auto-renewal clause detected",
            patterns: compile_all(&[
                r"auto(?:matic(?:ally)?)?[\s-]+renew",
                r"shall\s+(?:automatically\s+)?(?:be\s+)?renewed?\s+(?:for|unless)",
                r"deemed\s+(?:to\s+be\s+)?renewed",
                r"renew(?:ed|al)\s+(?:automatically|without\s+notice)",
            ]),
        },
        RiskSignature {
            risk_type: "vague_penalties",
            severity: Severity::Medium,
            description: "Vague or undefined penalty clause",
            patterns: compile_all(&[
                r"(?:reasonable|appropriate|adequate|suitable)\s+(?:penalty|penalt|damages|compensation)",
                r"(?:penalty|penalties)\s+(?:as\s+)?(?:deemed|determined)\s+(?:fit|appropriate|necessary)",
                r"(?:liquidated\s+)?damages\s+(?:to\s+be\s+)?determined",
                r"penalty\s+(?:amount\s+)?(?:not|to\s+be)\s+(?:specified|determined\s+later)",
            ]),
        },
        RiskSignature {
            risk_type: "non_compete_broad",
            severity: Severity::Medium,
            description: "Broad non-compete clause detected",
            patterns: compile_all(&[
                r"non[\s-]?compete?\s+(?:clause|agreement|covenant|restriction)",
                r"(?:shall|will)\s+not\s+(?:directly\s+or\s+indirectly\s+)?(?:engage|compete|work|participate)",
                r"refrain\s+from\s+(?:any\s+)?(?:competitive|competing)\s+activit",
                r"restrictive\s+covenant",
            ]),
        },
        RiskSignature {
            risk_type: "waiver_of_rights",
            severity: Severity::High,
            description: "Waiver of significant rights detected",
            patterns: compile_all(&[
                r"waive(?:s|r)?\s+(?:all|any|the\s+right\s+to)",
                r"irrevocabl[ey]\s+waive",
                r"forever\s+(?:waive|relinquish|abandon)",
                r"give\s+up\s+(?:all|any)\s+(?:rights?|claims?)",
            ]),
        },
        RiskSignature {
            risk_type: "exclusive_jurisdiction",
            severity: Severity::Low,
            description: "Exclusive jurisdiction clause – may limit legal options",
            patterns: compile_all(&[
                r"exclusive\s+jurisdiction\s+of\s+(?:the\s+)?courts?\s+(?:of|in|at)",
                r"submit\s+to\s+(?:the\s+)?(?:exclusive\s+)?jurisdiction",
                r"(?:sole|exclusive)\s+venue",
            ]),
        },
        RiskSignature {
            risk_type: "indemnification_broad",
            severity: Severity::High,
            description: "Broad indemnification obligation detected",
            patterns: compile_all(&[
                r"indemnif(?:y|ies|ication)\s+(?:and\s+hold\s+harmless\s+)?(?:against\s+)?(?:all|any|every)",
                r"(?:full|complete|total)\s+indemnif(?:y|ication)",
                r"indemnif\w+\s+(?:from\s+and\s+against\s+)?(?:any\s+and\s+)?all\s+(?:claims|losses|damages|liabilities)",
            ]),
        },
        RiskSignature {
            risk_type: "confidentiality_perpetual",
            severity: Severity::Medium,
            description: "Perpetual or indefinite confidentiality obligation",
            patterns: compile_all(&[
                r"confidential(?:ity)?\s+(?:obligations?\s+)?(?:shall\s+)?(?:survive|remain|continue)\s+(?:in\s+perpetuity|indefinitely|forever)",
                r"perpetual\s+confidential(?:ity)?",
                r"no\s+(?:time\s+)?limit\s+(?:on\s+)?confidential(?:ity)?",
            ]),
        },
    ];

    pub(super) static ref RISK_PROTOTYPES: Vec<RiskPrototype> = vec![
        RiskPrototype {
            risk_type: "unlimited_liability",
            severity: Severity::High,
            sentences: &[
                "Unlimited liability without any cap.",
                "The consultant shall bear responsibility without limitation.",
                "No limit on damages or liability.",
                "Full and complete liability for all losses.",
            ],
        },
        RiskPrototype {
            risk_type: "one_sided_termination",
            severity: Severity::High,
            sentences: &[
                "One party can terminate the agreement at any time without reason.",
                "Unilateral termination without notice.",
                "The company has exclusive right to end this contract.",
            ],
        },
        RiskPrototype {
            risk_type: "non_compete_broad",
            severity: Severity::Medium,
            sentences: &[
                "The employee shall not compete or work for any competitor.",
                "Broad non-compete restriction preventing all competitive activity.",
                "Prohibition from engaging in any similar business.",
            ],
        },
        RiskPrototype {
            risk_type: "waiver_of_rights",
            severity: Severity::High,
            sentences: &[
                "The party irrevocably waives all legal rights and claims.",
                "Complete waiver of rights to sue or seek damages.",
                "Giving up all rights to compensation.",
            ],
        },
        RiskPrototype {
            risk_type: "indemnification_broad",
            severity: Severity::High,
            sentences: &[
                "Indemnify against all claims, losses, damages and liabilities.",
                "Full indemnification for any and all losses.",
                "Hold harmless from all third-party claims.",
            ],
        },
        RiskPrototype {
            risk_type: "auto_renewal",
            severity: Severity::Medium,
            sentences: &[
                "The contract automatically renews unless cancelled.",
                "Deemed renewed without notice for additional terms.",
            ],
        },
        RiskPrototype {
            risk_type: "confidentiality_perpetual",
            severity: Severity::Medium,
            sentences: &[
                "Confidentiality obligations continue indefinitely without time limit.",
                "Perpetual confidentiality with no expiration.",
            ],
        },
    ];

    pub(super) static ref QUALITY_VALIDATORS: Vec<QualityValidator> = vec![
        QualityValidator {
            clause_type: "termination",
            weight_factor: 0.6,
            checks: vec![
                rule("notice_defined", "Notice period defined", &[
                    r"(?:notice|prior\s+notice|written\s+notice)\s+(?:of\s+)?\d+\s*(?:days?|weeks?|months?)",
                    r"\d+\s*(?:days?|weeks?|months?)\s*(?:prior\s+)?(?:written\s+)?notice",
                ]),
                rule("mutual", "Mutual termination right", &[
                    r"(?:either|both|any)\s+party",
                    r"mutual(?:ly)?",
                    r"(?:by\s+)?(?:either|any)\s+(?:of\s+the\s+)?part(?:y|ies)",
                ]),
                rule("cure_period", "Cure period specified", &[
                    r"(?:cure|remedy|rectif)\w*\s+(?:period|within|of)",
                    r"(?:opportunity|right)\s+to\s+(?:cure|remedy|rectif)",
                ]),
                rule("grounds", "Termination grounds specified", &[
                    r"(?:for\s+cause|material\s+breach|grounds?\s+(?:for|of)|reason\s+(?:for|of))",
                    r"(?:breach|default|failure|violation)\s+(?:of|to)",
                ]),
            ],
        },
        QualityValidator {
            clause_type: "liability",
            weight_factor: 0.5,
            checks: vec![
                rule("cap_defined", "Liability cap defined", &[
                    r"(?:cap|limit|limitation|ceiling|maximum)\s+(?:of|on|to)\s+(?:liability|damages)",
                    r"(?:liability|damages)\s+(?:shall\s+)?(?:not\s+exceed|be\s+limited\s+to|capped\s+at)",
                    r"(?:aggregate|total|maximum)\s+(?:liability|damages)",
                ]),
                rule("exclusions", "Liability exclusions specified", &[
                    r"(?:exclud|except|carve[- ]out)\w*\s+(?:from\s+)?(?:liability|limitation)",
                    r"(?:indirect|consequential|incidental|special|punitive)\s+damages",
                ]),
            ],
        },
        QualityValidator {
            clause_type: "confidentiality",
            weight_factor: 0.4,
            checks: vec![
                rule("duration", "Confidentiality duration defined", &[
                    r"(?:confidential\w*\s+)?(?:obligat\w+\s+)?(?:shall\s+)?(?:survive|continue|remain)\s+(?:for|until|during)",
                    r"(?:period|term|duration)\s+of\s+(?:confidential|non-disclos)",
                    r"\d+\s*(?:years?|months?)\s+(?:after|following|from)",
                ]),
                rule("scope", "Scope of confidential information defined", &[
                    r"(?:defin\w+\s+(?:of\s+)?|means?\s+)?(?:confidential\s+information)",
                    r"(?:includes?\s+(?:but\s+is\s+)?(?:not\s+)?limited\s+to)",
                ]),
                rule("return_obligations", "Return/destruction obligations specified", &[
                    r"(?:return|destroy|delete)\s+(?:all\s+)?(?:confidential|materials?|documents?|copies)",
                ]),
            ],
        },
        QualityValidator {
            clause_type: "dispute_resolution",
            weight_factor: 0.4,
            checks: vec![
                rule("mechanism", "Resolution mechanism specified", &[
                    r"(?:arbitration|mediation|conciliation|negotiation)",
                ]),
                rule("venue", "Venue/seat specified", &[
                    r"(?:seat|venue|place|location)\s+(?:of|for)\s+(?:arbitration|proceedings|disputes?)",
                    r"(?:courts?\s+(?:of|in|at)|jurisdiction\s+(?:of|in))\s+\w+",
                ]),
            ],
        },
        QualityValidator {
            clause_type: "payment_terms",
            weight_factor: 0.4,
            checks: vec![
                rule("amount", "Payment amount specified", &[
                    r"(?:Rs\.?|INR|₹|USD|\$|€)\s*[\d,]+",
                    r"(?:fee|amount|price|rate|cost|compensation)\s+(?:of|is|shall\s+be|equals?)\s+",
                ]),
                rule("schedule", "Payment schedule defined", &[
                    r"(?:due|payable|paid)\s+(?:within|on|by|before)\s+",
                    r"(?:monthly|quarterly|annually|bi-weekly|weekly)\s+(?:payment|installment|basis)",
                    r"(?:net\s+)?\d+\s*(?:days?)",
                ]),
            ],
        },
    ];

    pub(super) static ref MODAL_FAMILIES: Vec<ModalFamily> = vec![
        modals(
            ObligationStrength::Mandatory,
            &["shall", "must", "is required to", "is obligated to", "will"],
        ),
        modals(
            ObligationStrength::Recommended,
            &["should", "ought to", "is expected to", "is advised to"],
        ),
        modals(
            ObligationStrength::Optional,
            &["may", "can", "is permitted to", "is entitled to", "has the right to"],
        ),
    ];

    pub(super) static ref VAGUE_TERMS: Vec<VagueTerm> = vague(&[
        "reasonable",
        "reasonably",
        "promptly",
        "adequate",
        "adequately",
        "appropriate",
        "appropriately",
        "timely",
        "as soon as practicable",
        "best efforts",
        "good faith",
        "commercially reasonable",
        "material",
        "materially",
        "substantial",
        "substantially",
        "satisfactory",
        "sufficient",
        "sufficiently",
        "fair",
        "fairly",
        "customary",
        "usual",
        "normal",
        "proper",
        "properly",
        "from time to time",
        "as necessary",
        "as applicable",
        "to the extent possible",
        "in its sole discretion",
        "without limitation",
        "including but not limited to",
    ]);

    pub(super) static ref PASSIVE_PATTERNS: Vec<Regex> = compile_all(&[
        r"\b(?:is|are|was|were|be|been|being)\s+(?:\w+\s+)?(?:required|obligated|expected|permitted|authorized|entitled|deemed|considered|ensured|maintained|provided|delivered|completed|performed|executed|fulfilled|determined|decided|agreed|approved|accepted|rejected|terminated|renewed|amended|modified)\b",
        r"\b(?:shall|will|must|should|may)\s+be\s+\w+ed\b",
        r"\b(?:it\s+is|it\s+shall\s+be)\s+(?:the\s+)?(?:responsibility|duty|obligation)\b",
    ]);

    pub(super) static ref MISSING_SUBJECT_PATTERNS: Vec<Regex> = compile_all(&[
        r"^\s*(?:shall|must|will|should)\s+(?:be\s+)?(?:\w+ed)\b",
        r"\b(?:the\s+(?:same|said|aforesaid))\s+shall\b",
        r"\b(?:it|this)\s+(?:shall|must|will)\b",
    ]);

    pub(super) static ref DEADLINE_PATTERNS: Vec<Regex> = compile_all(&[
        r"within\s+(\d+\s*(?:days?|weeks?|months?|years?|business\s+days?))",
        r"no\s+later\s+than\s+(.+?)(?:\.|,|;|$)",
        r"by\s+(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})",
        r"before\s+(.+?)(?:\.|,|;|$)",
        r"on\s+or\s+before\s+(.+?)(?:\.|,|;|$)",
    ]);

    pub(super) static ref CONDITION_PATTERNS: Vec<Regex> = compile_all(&[
        r"(?:provided\s+that|subject\s+to|in\s+the\s+event\s+(?:that|of)|if\s+and\s+only\s+if|upon|in\s+case\s+of|where)\s+(.+?)(?:\.|,|;|$)",
    ]);
}

pub(super) const CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        clause_type: "termination",
        keywords: &[
            "terminat",
            "end of agreement",
            "expiry",
            "expiration",
            "cessation",
            "cancellation",
        ],
        weight: 10,
        description: "Termination clause – defines how the contract can be ended",
    },
    ChecklistItem {
        clause_type: "liability",
        keywords: &[
            "liabilit",
            "liable",
            "limitation of liability",
            "cap on liability",
            "responsible",
            "responsibility",
        ],
        weight: 10,
        description: "Liability clause – defines liability limits and scope",
    },
    ChecklistItem {
        clause_type: "indemnity",
        keywords: &["indemnif", "indemnity", "hold harmless", "compensat"],
        weight: 8,
        description: "Indemnity clause – protection against third-party claims",
    },
    ChecklistItem {
        clause_type: "confidentiality",
        keywords: &[
            "confidential",
            "non-disclosure",
            "nda",
            "proprietary information",
            "trade secret",
        ],
        weight: 9,
        description: "Confidentiality clause – protects sensitive information",
    },
    ChecklistItem {
        clause_type: "governing_law",
        keywords: &[
            "governing law",
            "applicable law",
            "governed by",
            "laws of",
            "jurisdiction",
            "legal framework",
        ],
        weight: 8,
        description: "Governing law clause – specifies applicable legal jurisdiction",
    },
    ChecklistItem {
        clause_type: "dispute_resolution",
        keywords: &[
            "dispute",
            "arbitration",
            "mediation",
            "resolution",
            "litigation",
            "court",
            "tribunal",
        ],
        weight: 9,
        description: "Dispute resolution clause – defines how disputes are handled",
    },
    ChecklistItem {
        clause_type: "force_majeure",
        keywords: &[
            "force majeure",
            "act of god",
            "unforeseeable",
            "beyond control",
            "natural disaster",
            "pandemic",
            "extraordinary circumstances",
        ],
        weight: 7,
        description: "Force majeure clause – handles unforeseeable events",
    },
    ChecklistItem {
        clause_type: "payment_terms",
        keywords: &[
            "payment",
            "compensation",
            "fee",
            "price",
            "cost",
            "invoice",
            "billing",
            "remuneration",
            "consideration",
        ],
        weight: 9,
        description: "Payment terms – financial obligations and schedules",
    },
    ChecklistItem {
        clause_type: "notice",
        keywords: &[
            "notice",
            "notification",
            "written notice",
            "notify",
            "communication",
            "inform in writing",
        ],
        weight: 6,
        description: "Notice clause – how parties communicate formally",
    },
    ChecklistItem {
        clause_type: "amendment",
        keywords: &[
            "amend",
            "modification",
            "modify",
            "change",
            "variation",
            "alter",
            "supplement",
        ],
        weight: 6,
        description: "Amendment clause – how the contract can be changed",
    },
    ChecklistItem {
        clause_type: "intellectual_property",
        keywords: &[
            "intellectual property",
            "ip rights",
            "copyright",
            "patent",
            "trademark",
            "ownership of work",
            "work product",
        ],
        weight: 7,
        description: "IP clause – defines intellectual property ownership",
    },
    ChecklistItem {
        clause_type: "warranties",
        keywords: &[
            "warrant",
            "representation",
            "guarantee",
            "assurance",
            "covenant",
            "undertaking",
        ],
        weight: 7,
        description: "Warranties clause – promises about quality and accuracy",
    },
];
