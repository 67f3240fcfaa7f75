//! Template explanations for risk and compliance findings
//!
//! Each risk type and checklist clause type has an English and a Hindi
//! template. Unknown risk types fall back to the finding's own description,
//! unknown clause types to a generic "Missing:" line.

use shared_types::{
    ComplianceExplanation, ComplianceResult, Explanations, Language, RiskExplanation,
    RiskFinding, Severity,
};

use crate::text::truncate_chars;

const EXCERPT_CHARS: usize = 200;

struct Template {
    key: &'static str,
    english: &'static str,
    hindi: &'static str,
}

impl Template {
    fn text(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::Hindi => self.hindi,
        }
    }
}

const RISK_TEMPLATES: &[Template] = &[
    Template {
        key: "unlimited_liability",
        english: "⚠️ This clause exposes a party to unlimited financial liability. \
                  Without a cap on damages, one party could be held responsible for \
                  an unreasonable amount. Consider negotiating a liability cap.",
        hindi: "⚠️ यह खंड एक पक्ष को असीमित वित्तीय दायित्व के लिए उजागर करता है। \
                क्षति पर सीमा के बिना, एक पक्ष को अनुचित राशि के लिए जिम्मेदार ठहराया जा सकता है।",
    },
    Template {
        key: "one_sided_termination",
        english: "⚠️ This clause allows one party to terminate the contract without \
                  cause or with minimal notice. This creates an imbalanced agreement \
                  where one party holds significantly more power.",
        hindi: "⚠️ यह खंड एक पक्ष को बिना कारण या न्यूनतम सूचना के अनुबंध समाप्त \
                करने की अनुमति देता है।",
    },
    Template {
        key: "missing_notice_period",
        english: "⚠️ No notice period is specified for termination. This means the \
                  contract could be ended abruptly without adequate preparation time.",
        hindi: "⚠️ समाप्ति के लिए कोई सूचना अवधि निर्दिष्ट नहीं है।",
    },
    Template {
        key: "auto_renewal",
        english: "⚡ This contract contains an auto-renewal clause. If not actively \
                  cancelled before the renewal date, the contract will automatically \
                  extend. Ensure you track renewal dates.",
        hindi: "⚡ इस अनुबंध में स्वतः नवीनीकरण खंड है। यदि नवीनीकरण तिथि से \
                पहले सक्रिय रूप से रद्द नहीं किया जाता है, तो अनुबंध स्वचालित रूप \
                से विस्तारित होगा।",
    },
    Template {
        key: "vague_penalties",
        english: "⚡ The penalty terms in this clause are vague or undefined. Without \
                  specific amounts or calculation methods, penalties could be disputed \
                  or set arbitrarily.",
        hindi: "⚡ इस खंड में दंड की शर्तें अस्पष्ट या अपरिभाषित हैं।",
    },
    Template {
        key: "non_compete_broad",
        english: "⚡ A broad non-compete clause has been detected. This may restrict \
                  future employment or business activities significantly. Review the \
                  scope, duration, and geographic limitations.",
        hindi: "⚡ एक व्यापक गैर-प्रतिस्पर्धा खंड पाया गया है।",
    },
    Template {
        key: "waiver_of_rights",
        english: "⚠️ This clause involves a waiver of significant rights. Once waived, \
                  these rights may not be recoverable. Carefully review what rights are \
                  being given up.",
        hindi: "⚠️ इस खंड में महत्वपूर्ण अधिकारों की छूट शामिल है।",
    },
    Template {
        key: "exclusive_jurisdiction",
        english: "ℹ️ This clause specifies exclusive jurisdiction in a particular court. \
                  This means any disputes must be resolved in that specific location, \
                  which could be inconvenient or costly.",
        hindi: "ℹ️ यह खंड किसी विशेष न्यायालय में विशेष क्षेत्राधिकार निर्दिष्ट करता है।",
    },
    Template {
        key: "indemnification_broad",
        english: "⚠️ This clause contains broad indemnification language that could \
                  expose a party to unlimited financial obligations arising from \
                  third-party claims.",
        hindi: "⚠️ इस खंड में व्यापक क्षतिपूर्ति भाषा है।",
    },
    Template {
        key: "confidentiality_perpetual",
        english: "⚡ Confidentiality obligations extend indefinitely. Consider whether \
                  a reasonable time limit would be more appropriate.",
        hindi: "⚡ गोपनीयता दायित्व अनिश्चित काल तक बढ़ते हैं।",
    },
];

const MISSING_CLAUSE_TEMPLATES: &[Template] = &[
    Template {
        key: "termination",
        english: "❌ No termination clause found. The contract doesn't specify how it can be ended.",
        hindi: "❌ कोई समाप्ति खंड नहीं मिला।",
    },
    Template {
        key: "liability",
        english: "❌ No liability clause found. Liability limits are not defined, which could be risky.",
        hindi: "❌ कोई दायित्व खंड नहीं मिला।",
    },
    Template {
        key: "indemnity",
        english: "❌ No indemnity clause found. There's no protection against third-party claims.",
        hindi: "❌ कोई क्षतिपूर्ति खंड नहीं मिला।",
    },
    Template {
        key: "confidentiality",
        english: "❌ No confidentiality clause found. Sensitive information may not be protected.",
        hindi: "❌ कोई गोपनीयता खंड नहीं मिला।",
    },
    Template {
        key: "governing_law",
        english: "❌ No governing law clause found. Legal jurisdiction is undefined.",
        hindi: "❌ कोई शासी कानून खंड नहीं मिला।",
    },
    Template {
        key: "dispute_resolution",
        english: "❌ No dispute resolution clause found. How disputes will be handled is unclear.",
        hindi: "❌ कोई विवाद समाधान खंड नहीं मिला।",
    },
    Template {
        key: "force_majeure",
        english: "⚠️ No force majeure clause found. The contract doesn't address unforeseeable events.",
        hindi: "⚠️ कोई अप्रत्याशित घटना खंड नहीं मिला।",
    },
    Template {
        key: "payment_terms",
        english: "❌ No payment terms found. Financial obligations are not clearly defined.",
        hindi: "❌ कोई भुगतान शर्तें नहीं मिलीं।",
    },
    Template {
        key: "notice",
        english: "⚠️ No notice clause found. Formal communication procedures are undefined.",
        hindi: "⚠️ कोई सूचना खंड नहीं मिला।",
    },
    Template {
        key: "amendment",
        english: "⚠️ No amendment clause found. It's unclear how the contract can be modified.",
        hindi: "⚠️ कोई संशोधन खंड नहीं मिला।",
    },
    Template {
        key: "intellectual_property",
        english: "⚠️ No IP clause found. Intellectual property ownership is undefined.",
        hindi: "⚠️ कोई बौद्धिक संपदा खंड नहीं मिला।",
    },
    Template {
        key: "warranties",
        english: "⚠️ No warranties clause found. No quality or accuracy guarantees are specified.",
        hindi: "⚠️ कोई वारंटी खंड नहीं मिला।",
    },
];

fn template(table: &'static [Template], key: &str) -> Option<&'static Template> {
    table.iter().find(|t| t.key == key)
}

pub fn explain(risks: &[RiskFinding], compliance: &ComplianceResult, language: Language) -> Explanations {
    let risk_explanations = risks
        .iter()
        .map(|risk| RiskExplanation {
            clause_id: risk.clause_id,
            risk_type: risk.risk_type.clone(),
            severity: risk.severity,
            explanation: template(RISK_TEMPLATES, &risk.risk_type)
                .map(|t| t.text(language).to_string())
                .unwrap_or_else(|| risk.description.clone()),
            flagged_text: risk.matched_text.clone(),
            clause_excerpt: truncate_chars(&risk.clause_text, EXCERPT_CHARS),
        })
        .collect();

    let compliance_explanations = compliance
        .missing_clauses
        .iter()
        .map(|missing| ComplianceExplanation {
            clause_type: missing.clause_type.clone(),
            importance: missing.importance,
            explanation: template(MISSING_CLAUSE_TEMPLATES, &missing.clause_type)
                .map(|t| t.text(language).to_string())
                .unwrap_or_else(|| format!("Missing: {}", missing.clause_type)),
        })
        .collect();

    Explanations {
        risk_explanations,
        compliance_explanations,
        overall_summary: overall_summary(risks, compliance, language),
    }
}

/// One-paragraph verdict keyed on the presence of high-severity risks
pub fn overall_summary(risks: &[RiskFinding], compliance: &ComplianceResult, language: Language) -> String {
    let risk_count = risks.len();
    let high = risks.iter().filter(|r| r.severity == Severity::High).count();
    let missing = compliance.total_missing;
    let score = compliance.score;

    match language {
        Language::Hindi if high > 0 => format!(
            "⚠️ इस अनुबंध में {} जोखिम पाए गए, जिनमें {} उच्च गंभीरता के हैं। \
             अनुपालन स्कोर: {}/100। {} आवश्यक खंड गायब हैं।",
            risk_count, high, score, missing
        ),
        Language::Hindi if risk_count > 0 => format!(
            "⚡ इस अनुबंध में {} मध्यम/निम्न जोखिम पाए गए। अनुपालन स्कोर: {}/100।",
            risk_count, score
        ),
        Language::Hindi => format!(
            "✅ कोई महत्वपूर्ण जोखिम नहीं पाए गए। अनुपालन स्कोर: {}/100।",
            score
        ),
        Language::English if high > 0 => format!(
            "⚠️ This contract contains {} risk finding(s), including {} high-severity issue(s). \
             Compliance score: {}/100. {} essential clause(s) are missing. \
             Careful review is strongly recommended before signing.",
            risk_count, high, score, missing
        ),
        Language::English if risk_count > 0 => format!(
            "⚡ This contract has {} medium/low risk finding(s). Compliance score: {}/100. \
             Review the flagged clauses before proceeding.",
            risk_count, score
        ),
        Language::English => format!(
            "✅ No significant risks detected. Compliance score: {}/100. \
             The contract appears to be generally well-structured.",
            score
        ),
    }
}
