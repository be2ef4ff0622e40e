//! Locale-specific instruction bundles for extraction and repair prompts.
//!
//! The rule texts are configuration data handed to the model. Nothing here
//! is enforced in code; validation and deduplication are the only hard
//! guarantees.

/// Label used when the source language is `auto` or unknown.
pub const AUTO_DETECT: &str = "auto-detect";

const LANGUAGE_NAMES: [(&str, &str); 14] = [
    ("en", "English"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
];

/// Language of the instruction text itself. Selected by target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionLocale {
    English,
    Japanese,
    Korean,
    Chinese,
    Spanish,
    French,
    German,
}

impl InstructionLocale {
    /// Maps a language code to a locale, falling back to English.
    ///
    /// Only the primary subtag counts, so `zh-TW` selects Chinese.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match primary_subtag(code).as_str() {
            "ja" => Self::Japanese,
            "ko" => Self::Korean,
            "zh" => Self::Chinese,
            "es" => Self::Spanish,
            "fr" => Self::French,
            "de" => Self::German,
            _ => Self::English,
        }
    }

    fn extraction(self) -> &'static ExtractionText {
        match self {
            Self::Japanese => &JA_EXTRACTION,
            Self::Korean => &KO_EXTRACTION,
            Self::Chinese => &ZH_EXTRACTION,
            // Extraction instructions are only localized for four locales.
            Self::English | Self::Spanish | Self::French | Self::German => &EN_EXTRACTION,
        }
    }

    fn repair(self) -> &'static RepairText {
        match self {
            Self::English => &EN_REPAIR,
            Self::Japanese => &JA_REPAIR,
            Self::Korean => &KO_REPAIR,
            Self::Chinese => &ZH_REPAIR,
            Self::Spanish => &ES_REPAIR,
            Self::French => &FR_REPAIR,
            Self::German => &DE_REPAIR,
        }
    }

    fn extraction_prompt(self, source: Option<&str>, target: &str) -> String {
        match (self.extraction().locale, source) {
            (Self::Japanese, None) => format!(
                "以下のURLから重要な語彙単語とその意味を抽出してください。ソース言語を自動検出し、意味を{target}に翻訳してください。サイトの内容を理解し、その主題に関連する重要な単語のみを抽出してください。"
            ),
            (Self::Japanese, Some(source)) => format!(
                "以下のURLから{source}の重要な語彙単語とその{target}の意味を抽出してください。サイトの内容を理解し、その主題に関連する重要な単語のみを抽出してください。"
            ),
            (Self::Korean, None) => format!(
                "다음 URL에서 중요한 어휘 단어와 의미를 추출하세요. 소스 언어를 자동으로 감지하고 의미를 {target}로 번역하세요. 사이트의 내용을 이해하고 주제와 관련된 중요한 단어만 추출하세요."
            ),
            (Self::Korean, Some(source)) => format!(
                "다음 URL에서 중요한 {source} 어휘 단어와 {target} 의미를 추출하세요. 사이트의 내용을 이해하고 주제와 관련된 중요한 단어만 추출하세요."
            ),
            (Self::Chinese, None) => format!(
                "从以下URL提取重要的词汇和它们的含义。自动检测源语言并将含义翻译成{target}。理解网站内容，仅提取与主题相关的重要单词。"
            ),
            (Self::Chinese, Some(source)) => format!(
                "从以下URL提取重要的{source}词汇和它们的{target}含义。理解网站内容，仅提取与主题相关的重要单词。"
            ),
            (_, None) => format!(
                "Extract important vocabulary words and their meanings from the following URL. Detect the source language automatically and translate meanings to {target}. Understand the content of the site and extract only words that are relevant to the main topic."
            ),
            (_, Some(source)) => format!(
                "Extract important {source} vocabulary words and their {target} meanings from the following URL. Understand the content of the site and extract only words that are relevant to the main topic."
            ),
        }
    }
}

struct ExtractionText {
    locale: InstructionLocale,
    note: &'static str,
    rules: &'static [&'static str],
    technical: &'static [&'static str],
}

struct RepairText {
    instruction: &'static str,
    note: &'static str,
    rules: &'static [&'static str],
    incomplete_label: &'static str,
}

/// Everything a prompt builder needs for one (source, target) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    pub locale: InstructionLocale,
    pub source_name: &'static str,
    pub target_name: &'static str,
    /// True when the model must detect the source language itself.
    pub auto_detect: bool,
    pub extraction_prompt: String,
    pub extraction_note: &'static str,
    pub extraction_rules: &'static [&'static str],
    pub technical_instructions: &'static [&'static str],
    pub repair_prompt: &'static str,
    pub repair_note: &'static str,
    pub repair_rules: &'static [&'static str],
    pub incomplete_label: &'static str,
}

/// Resolves the instruction bundle for a language pair. Never fails:
/// unknown targets get the English bundle, unknown sources are auto-detected.
#[must_use]
pub fn resolve(source_language: &str, target_language: &str) -> LanguageProfile {
    let locale = InstructionLocale::from_code(target_language);
    let source_name = language_name(source_language);
    let target_name = language_name(target_language).unwrap_or("English");

    let extraction = locale.extraction();
    let repair = locale.repair();

    LanguageProfile {
        locale,
        source_name: source_name.unwrap_or(AUTO_DETECT),
        target_name,
        auto_detect: source_name.is_none(),
        extraction_prompt: locale.extraction_prompt(source_name, target_name),
        extraction_note: extraction.note,
        extraction_rules: extraction.rules,
        technical_instructions: extraction.technical,
        repair_prompt: repair.instruction,
        repair_note: repair.note,
        repair_rules: repair.rules,
        incomplete_label: repair.incomplete_label,
    }
}

/// Display name for a language code; `None` for `auto` and unknown codes.
#[must_use]
pub fn language_name(code: &str) -> Option<&'static str> {
    let primary = primary_subtag(code);
    LANGUAGE_NAMES
        .iter()
        .find(|(known, _)| *known == primary)
        .map(|(_, name)| *name)
}

fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

static EN_EXTRACTION: ExtractionText = ExtractionText {
    locale: InstructionLocale::English,
    note: "【IMPORTANT】Return ONLY JSON in this format:",
    rules: &[
        "Extract vocabulary word and meaning pairs from tables, lists, and paragraphs on the site",
        "Extract ONLY words that are directly relevant to the site's main topic or content (exclude common words with low relevance)",
        "Prioritize words that have value for learners (exclude basic words like 'the', 'and', etc.)",
        "Prioritize technical terms, key concepts, and distinctive expressions",
        "Each entry must be complete with both \"word\" and \"meaning\"",
        "Return pure JSON only (no markdown or explanations)",
        "Extract only words that actually exist on the site (don't create imaginary words)",
        "If response becomes long, ensure it ends with valid JSON",
        "For dictionary or vocabulary list sites, extract headwords as 'word'",
    ],
    technical: &[
        "Scan the entire page and understand the site's theme and content",
        "Identify the site's main topic and filter for high-relevance vocabulary only",
        "Include dynamic content and Ajax-loaded data",
        "Include hidden and invisible elements",
        "Support table format, list format, and paragraph format",
        "If data is large, it can be split but each split must end with valid JSON",
    ],
};

static JA_EXTRACTION: ExtractionText = ExtractionText {
    locale: InstructionLocale::Japanese,
    note: "【重要】以下の形式でのみJSONを返してください：",
    rules: &[
        "サイト上のテーブル、リスト、段落から語彙単語と意味のペアを抽出",
        "サイトの主題や内容に直接関連する単語のみを抽出（関連性の低い一般的な単語は除外）",
        "学習者にとって価値のある単語を優先（「the」「and」などの基本単語は除外）",
        "専門用語、キーコンセプト、特徴的な表現を優先して抽出",
        "各エントリーは「word」と「meaning」の両方を完全に含める",
        "純粋なJSONのみ返す（マークダウンや説明なし）",
        "サイトに実際に存在する単語のみ抽出（架空の単語は作らない）",
        "レスポンスが長くなる場合は、有効なJSONで終わらせる",
        "辞書や語彙リストの場合は、見出し語を「word」として抽出",
    ],
    technical: &[
        "ページ全体をスキャンし、サイトのテーマと内容を理解する",
        "サイトの主題を特定し、関連性の高い単語のみをフィルタリング",
        "動的コンテンツとAjax読み込みデータを含める",
        "非表示および見えない要素を含める",
        "テーブル形式、リスト形式、段落形式をサポート",
        "データが大きい場合は分割可能だが、各分割は有効なJSONで終了",
    ],
};

static KO_EXTRACTION: ExtractionText = ExtractionText {
    locale: InstructionLocale::Korean,
    note: "【중요】다음 형식으로만 JSON을 반환하세요:",
    rules: &[
        "사이트의 테이블, 목록, 단락에서 어휘 단어와 의미 쌍 추출",
        "사이트의 주제나 내용과 직접 관련된 단어만 추출 (관련성이 낮은 일반적인 단어 제외)",
        "학습자에게 가치 있는 단어 우선 ('the', 'and' 등과 같은 기본 단어 제외)",
        "전문 용어, 핵심 개념 및 특징적인 표현을 우선 추출",
        "각 항목은 \"word\"와 \"meaning\" 모두 완전히 포함",
        "순수한 JSON만 반환 (마크다운이나 설명 없음)",
        "사이트에 실제로 존재하는 단어만 추출 (가상의 단어 생성 금지)",
        "응답이 길어지면 유효한 JSON으로 끝내기",
        "사전이나 어휘 목록 사이트의 경우 표제어를 'word'로 추출",
    ],
    technical: &[
        "전체 페이지를 스캔하고 사이트의 테마와 내용 이해",
        "사이트의 주제를 파악하고 관련성이 높은 단어만 필터링",
        "동적 콘텐츠와 Ajax 로드 데이터 포함",
        "숨겨진 요소와 보이지 않는 요소 포함",
        "테이블 형식, 목록 형식, 단락 형식 지원",
        "데이터가 크면 분할 가능하지만 각 분할은 유효한 JSON으로 종료",
    ],
};

static ZH_EXTRACTION: ExtractionText = ExtractionText {
    locale: InstructionLocale::Chinese,
    note: "【重要】仅以以下格式返回JSON：",
    rules: &[
        "从网站的表格、列表和段落中提取词汇和含义对",
        "仅提取与网站主题或内容直接相关的单词（排除相关性低的常见词）",
        "优先提取对学习者有价值的单词（排除'the'、'and'等基础词汇）",
        "优先提取专业术语、关键概念和特色表达",
        "每个条目必须同时完整包含\"word\"和\"meaning\"",
        "仅返回纯JSON（无Markdown或解释）",
        "仅提取网站上实际存在的单词（不创造虚构单词）",
        "如果响应变长，确保以有效的JSON结尾",
        "对于词典或词汇列表网站，将标题词提取为'word'",
    ],
    technical: &[
        "扫描整个页面并理解网站主题和内容",
        "识别网站主题并仅过滤出高相关性的词汇",
        "包括动态内容和Ajax加载的数据",
        "包括隐藏和不可见元素",
        "支持表格格式、列表格式和段落格式",
        "如果数据较大，可以分割，但每个分割必须以有效的JSON结尾",
    ],
};

static EN_REPAIR: RepairText = RepairText {
    instruction: "Please repair the following incomplete JSON.",
    note: "【IMPORTANT】This JSON contains a list of vocabulary words and their meanings. Return ONLY in this format:",
    rules: &[
        "Remove incomplete entries at the end",
        "Every entry must have both \"word\" and \"meaning\"",
        "Fix invalid characters and escape sequences",
        "Remove extra commas and brackets",
        "Return pure JSON only (no explanations or markdown)",
        "Strings must be enclosed in double quotes",
        "Properly escape newlines and tab characters",
    ],
    incomplete_label: "Incomplete JSON:",
};

static JA_REPAIR: RepairText = RepairText {
    instruction: "以下の不完全なJSONを修復してください。",
    note: "【重要】このJSONは語彙単語とその意味のリストを含んでいます。以下の形式でのみ返してください：",
    rules: &[
        "末尾の不完全なエントリーを削除",
        "すべてのエントリーに「word」と「meaning」が必要",
        "無効な文字とエスケープシーケンスを修正",
        "余分なカンマと括弧を削除",
        "純粋なJSONのみ返す（説明やマークダウンなし）",
        "文字列は二重引用符で囲む",
        "改行とタブ文字を適切にエスケープ",
    ],
    incomplete_label: "不完全なJSON：",
};

static KO_REPAIR: RepairText = RepairText {
    instruction: "다음의 불완전한 JSON을 수정해주세요.",
    note: "【중요】이 JSON은 어휘 단어와 그 의미의 목록을 포함합니다. 다음 형식으로만 반환해주세요:",
    rules: &[
        "끝부분의 불완전한 항목 제거",
        "모든 항목에 \"word\"와 \"meaning\"이 필요",
        "잘못된 문자와 이스케이프 시퀀스 수정",
        "불필요한 쉼표와 괄호 제거",
        "순수한 JSON만 반환 (설명이나 마크다운 없음)",
        "문자열은 이중 따옴표로 묶기",
        "개행과 탭 문자를 적절히 이스케이프",
    ],
    incomplete_label: "불완전한 JSON:",
};

static ZH_REPAIR: RepairText = RepairText {
    instruction: "请修复以下不完整的JSON。",
    note: "【重要】此JSON包含词汇单词及其含义的列表。仅以以下格式返回：",
    rules: &[
        "删除末尾的不完整条目",
        "每个条目必须同时包含\"word\"和\"meaning\"",
        "修复无效字符和转义序列",
        "删除多余的逗号和括号",
        "仅返回纯JSON（无说明或markdown）",
        "字符串必须用双引号括起来",
        "正确转义换行符和制表符",
    ],
    incomplete_label: "不完整的JSON：",
};

static ES_REPAIR: RepairText = RepairText {
    instruction: "Por favor, repare el siguiente JSON incompleto.",
    note: "【IMPORTANTE】Este JSON contiene una lista de palabras de vocabulario y sus significados. Devuelva SOLO en este formato:",
    rules: &[
        "Eliminar entradas incompletas al final",
        "Cada entrada debe tener \"word\" y \"meaning\"",
        "Corregir caracteres inválidos y secuencias de escape",
        "Eliminar comas y corchetes extra",
        "Devolver solo JSON puro (sin explicaciones o markdown)",
        "Las cadenas deben estar entre comillas dobles",
        "Escapar correctamente saltos de línea y caracteres de tabulación",
    ],
    incomplete_label: "JSON incompleto:",
};

static FR_REPAIR: RepairText = RepairText {
    instruction: "Veuillez réparer le JSON incomplet suivant.",
    note: "【IMPORTANT】Ce JSON contient une liste de mots de vocabulaire et leurs significations. Retournez SEULEMENT dans ce format:",
    rules: &[
        "Supprimer les entrées incomplètes à la fin",
        "Chaque entrée doit avoir \"word\" et \"meaning\"",
        "Corriger les caractères invalides et les séquences d'échappement",
        "Supprimer les virgules et crochets supplémentaires",
        "Retourner uniquement du JSON pur (pas d'explications ou markdown)",
        "Les chaînes doivent être entre guillemets doubles",
        "Échapper correctement les sauts de ligne et caractères de tabulation",
    ],
    incomplete_label: "JSON incomplet:",
};

static DE_REPAIR: RepairText = RepairText {
    instruction: "Bitte reparieren Sie das folgende unvollständige JSON.",
    note: "【WICHTIG】Dieses JSON enthält eine Liste von Vokabelwörtern und deren Bedeutungen. Geben Sie NUR in diesem Format zurück:",
    rules: &[
        "Unvollständige Einträge am Ende entfernen",
        "Jeder Eintrag muss \"word\" und \"meaning\" haben",
        "Ungültige Zeichen und Escape-Sequenzen reparieren",
        "Zusätzliche Kommas und Klammern entfernen",
        "Nur reines JSON zurückgeben (keine Erklärungen oder Markdown)",
        "Strings müssen in Anführungszeichen stehen",
        "Zeilenumbrüche und Tabulatoren richtig escapen",
    ],
    incomplete_label: "Unvollständiges JSON:",
};
