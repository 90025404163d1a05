// Test fixtures with known policy texts and expected chunk reports
// WHY: Golden-file testing requires deterministic input/output pairs for validation

/// Reference library used by the integration tests
/// WHY: kept separate from data/reference.json so editing the shipped library never breaks tests
pub const REFERENCE_JSON: &str = r#"{
  "patterns": [
    {
      "id": "share-third-parties",
      "category": "data-sharing",
      "triggers": ["share data", "disclose.*\\bthird part(y|ies)\\b"],
      "description": "Personal data is shared with third parties.",
      "severity": "high",
      "source_title": "FTC report",
      "source_url": "https://example.org/ftc"
    },
    {
      "id": "sell-personal-data",
      "category": "data-sharing",
      "triggers": ["\\bsell\\b.*\\bpersonal (data|information)\\b"],
      "description": "Personal data may be sold.",
      "severity": "high"
    },
    {
      "id": "no-sale",
      "category": "data-sharing",
      "triggers": ["do not sell", "never sell"],
      "description": "States that personal data is not sold.",
      "severity": "low"
    },
    {
      "id": "retention",
      "category": "retention",
      "triggers": ["retain.*(years", "retain.*\\b(years|months)\\b"],
      "description": "Data is retained for a long period.",
      "severity": "medium"
    },
    {
      "id": "cookies",
      "category": "tracking",
      "triggers": ["\\bcookies\\b"],
      "description": "Cookies track user activity.",
      "severity": "medium"
    },
    {
      "id": "policy-changes",
      "category": "policy-changes",
      "triggers": ["may change at any time", "change.*\\bwithout (prior )?notice\\b"],
      "description": "The policy can change without notice.",
      "severity": "medium"
    },
    {
      "id": "location",
      "category": "collection",
      "triggers": ["precise location"],
      "description": "Location data is collected.",
      "severity": "high"
    }
  ]
}"#;

/// Policy with CRLF breaks, blank lines, an ellipsis and an e-mail address
pub const POLICY_TEXT: &str = "Acme Privacy Policy.\r\n\r\nWe collect your precise location when you use the app. We may share data with our partners for advertising.\r\nWe do not sell your personal information.\n\nWe retain your data for 5 years. Cookies help us remember you...   We may change this policy without notice. Contact us at privacy@acme.example.";

/// Normalized character count of POLICY_TEXT
pub const POLICY_NORMALIZED_LEN: usize = 313;

/// Expected report for POLICY_TEXT with chunk size 4
/// Format: index<TAB>(start,end)<TAB>sentence_count<TAB>id:confidence,...
pub const POLICY_CHUNK4_EXPECTED: &str = "0\t(0,170)\t4\tshare-third-parties:low,sell-personal-data:low,no-sale:high,location:low
1\t(171,313)\t4\tretention:high,cookies:high,policy-changes:high";

/// Expected report for POLICY_TEXT with chunk size 2
pub const POLICY_CHUNK2_EXPECTED: &str = "0\t(0,75)\t2\tlocation:high
1\t(76,170)\t2\tshare-third-parties:low,sell-personal-data:low,no-sale:high
2\t(171,235)\t2\tretention:high,cookies:high
3\t(236,313)\t2\tpolicy-changes:high";

/// Expected report for POLICY_TEXT with one sentence per chunk
/// WHY: negation scope shrinks with the chunk, so "share data" becomes high confidence
pub const POLICY_CHUNK1_EXPECTED: &str = "0\t(0,20)\t1\t-
1\t(21,75)\t1\tlocation:high
2\t(76,128)\t1\tshare-third-parties:high
3\t(129,170)\t1\tsell-personal-data:low,no-sale:high
4\t(171,203)\t1\tretention:high
5\t(204,235)\t1\tcookies:high
6\t(236,277)\t1\tpolicy-changes:high
7\t(278,313)\t1\t-";

/// Expected report for POLICY_TEXT in a single chunk
pub const POLICY_SINGLE_CHUNK_EXPECTED: &str = "0\t(0,313)\t8\tshare-third-parties:low,sell-personal-data:low,no-sale:high,retention:low,cookies:low,policy-changes:low,location:low";

/// Three-sentence policy where the negation sits in an unrelated sentence
pub const SHORT_POLICY_TEXT: &str =
    "We do not sell your data. We may share data with partners. This policy may change at any time.";

pub const SHORT_POLICY_EXPECTED: &str = "0\t(0,94)\t3\tshare-third-parties:low,no-sale:high,policy-changes:low";
