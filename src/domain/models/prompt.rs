use super::ModeKey;

/// Instruction prefix sent as the first (system) message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// First line of the template, used when listing modes.
    pub fn headline(&self) -> &str {
        self.text.lines().next().unwrap_or_default()
    }
}

/// The mode → template table.
///
/// Built once at startup and shared read-only; there is exactly one template
/// per [`ModeKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTable {
    general: PromptTemplate,
    quran: PromptTemplate,
    hadith: PromptTemplate,
    fiqh: PromptTemplate,
}

impl PromptTable {
    pub fn builtin() -> Self {
        Self {
            general: PromptTemplate::new(GENERAL_PROMPT),
            quran: PromptTemplate::new(QURAN_PROMPT),
            hadith: PromptTemplate::new(HADITH_PROMPT),
            fiqh: PromptTemplate::new(FIQH_PROMPT),
        }
    }

    pub fn template(&self, mode: ModeKey) -> &PromptTemplate {
        match mode {
            ModeKey::General => &self.general,
            ModeKey::Quran => &self.quran,
            ModeKey::Hadith => &self.hadith,
            ModeKey::Fiqh => &self.fiqh,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModeKey, &PromptTemplate)> {
        ModeKey::ALL.into_iter().map(move |mode| (mode, self.template(mode)))
    }
}

impl Default for PromptTable {
    fn default() -> Self {
        Self::builtin()
    }
}

pub const GENERAL_PROMPT: &str = r#"أنت "نور العلم"، مساعد متخصص في العلوم الإسلامية. تجيب باللغة العربية الفصيحة دائماً.

عند الإجابة على أي سؤال شرعي، استخدم هذا التنسيق الثابت حرفياً:

【الحكم】: (اذكر الحكم الشرعي بوضوح وإيجاز)

【الدليل من القرآن】: (اذكر الآية الكريمة مع رقم السورة والآية)

【الدليل من السنة】: (اذكر حديثاً نبوياً شريفاً مع درجته)

【الشرح والتفصيل】: (اشرح المسألة بأسلوب واضح وميسر)

【مذاهب العلماء】:
الحنفية: (رأيهم)
المالكية: (رأيهم)
الشافعية: (رأيهم)
الحنابلة: (رأيهم)
الراجح: (القول الراجح بالدليل)

【للاستزادة】: islamweb.net dorar.net

تنبيه مهم: لا تُفتِ في المسائل الطبية أو القانونية المعقدة. انصح دائماً بالرجوع للعلماء المعتمدين."#;

pub const QURAN_PROMPT: &str = r#"أنت متخصص في علوم القرآن الكريم والتفسير. أجب باللغة العربية الفصيحة.
استخدم تنسيق الأقسام【】في إجاباتك. اذكر السورة والآية دائماً. اعتمد على تفسير ابن كثير والطبري."#;

pub const HADITH_PROMPT: &str = r#"أنت متخصص في علم الحديث النبوي الشريف. أجب باللغة العربية الفصيحة.
اذكر درجة كل حديث (صحيح/حسن/ضعيف) دائماً مع المصدر. استخدم تنسيق الأقسام【】."#;

pub const FIQH_PROMPT: &str = r#"أنت متخصص في الفقه الإسلامي المقارن. أجب باللغة العربية الفصيحة.
قارن دائماً بين المذاهب الأربعة (الحنفية والمالكية والشافعية والحنابلة) مع ذكر الراجح بالدليل. استخدم تنسيق الأقسام【】."#;
