use std::collections::HashMap;
use std::sync::OnceLock;

/// Locale used when a language has no curated sentence
pub const DEFAULT_PREVIEW_LANGUAGE: &str = "en-US";

const PREVIEW_SENTENCES: &[(&str, &str)] = &[
    ("pt-BR", "Olá, esta é uma demonstração da minha voz em português."),
    ("en-US", "Hello, this is a demonstration of my voice in English."),
    ("en-GB", "Hello, this is a demonstration of my voice in English."),
    ("es-ES", "Hola, esta es una demostración de mi voz en español."),
    ("it-IT", "Ciao, questa è una dimostrazione della mia voce in italiano."),
    ("de-DE", "Hallo, dies ist eine Demonstration meiner Stimme auf Deutsch."),
    ("fr-FR", "Bonjour, ceci est une démonstration de ma voix en français."),
    ("ja-JP", "こんにちは、これは日本語での私の声のデモンストレーションです。"),
    ("ko-KR", "안녕하세요, 이것은 한국어로 된 제 목소리 시연입니다."),
    ("ru-RU", "Здравствуйте, это демонстрация моего голоса на русском языке."),
    ("cmn-CN", "你好，这是我的中文声音演示。"),
    ("hi-IN", "नमस्ते, यह हिंदी में मेरी आवाज़ का प्रदर्शन है।"),
    ("ar-XA", "مرحبًا، هذا عرض توضيحي لصوتي باللغة العربية."),
    ("bn-IN", "হ্যালো, এটি বাংলায় আমার ভয়েসের একটি প্রদর্শনী।"),
    ("da-DK", "Hej, dette er en demonstration af min stemme på dansk."),
    ("nl-BE", "Hallo, dit is een demonstratie van mijn stem in het Nederlands."),
    ("nl-NL", "Hallo, dit is een demonstratie van mijn stem in het Nederlands."),
    ("en-AU", "Hello, this is a demonstration of my voice in English."),
    ("en-IN", "Hello, this is a demonstration of my voice in English."),
    ("fi-FI", "Hei, tämä on esittely äänestäni suomeksi."),
    ("fr-CA", "Bonjour, ceci est une démonstration de ma voix en français."),
    ("gu-IN", "નમસ્તે, આ ગુજરાતીમાં મારા અવાજનું પ્રદર્શન છે."),
    ("id-ID", "Halo, ini adalah demonstrasi suara saya dalam bahasa Indonesia."),
    ("kn-IN", "ನಮಸ್ಕಾರ, ಇದು ಕನ್ನಡದಲ್ಲಿ ನನ್ನ ಧ್ವನಿಯ ಪ್ರಾತ್ಯಕ್ಷಿಕೆ."),
    ("ml-IN", "നമസ്കാരം, ഇത് മലയാളത്തിലുള്ള എൻ്റെ ശബ്ദത്തിൻ്റെ ഒരു ഡെമോ ആണ്."),
    ("mr-IN", "नमस्कार, हे माझ्या मराठी आवाजाचे प्रात्यक्षिक आहे."),
    ("nb-NO", "Hei, dette er en demonstrasjon av min stemme på norsk."),
    ("pl-PL", "Cześć, to jest demonstracja mojego głosu w języku polskim."),
    ("sv-SE", "Hej, det här är en demonstration av min röst på svenska."),
    ("sw-KE", "Habari, hii ni onyesho la sauti yangu kwa Kiswahili."),
    ("ta-IN", "வணக்கம், இது தமிழில் என் குரலின் செயல்விளக்கம்."),
    ("te-IN", "నమస్కారం, ఇది తెలుగులో నా వాయిస్ యొక్క ప్రదర్శన."),
    ("th-TH", "สวัสดี นี่คือการสาธิตเสียงของฉันในภาษาไทย"),
    ("tr-TR", "Merhaba, bu benim Türkçe sesimin bir gösterimidir."),
    ("uk-UA", "Привіт, це демонстрація мого голосу українською мовою."),
    ("ur-IN", "ہیلو، یہ اردو میں میری آواز کا مظاہرہ ہے۔"),
    ("vi-VN", "Xin chào, đây là phần trình diễn giọng nói của tôi bằng tiếng Việt."),
    ("es-US", "Hola, esta es una demostración de mi voz en español."),
];

/// Sample sentences used to audition a voice before synthesizing real text
pub struct PreviewSentences {
    sentences: HashMap<&'static str, &'static str>,
    default_sentence: &'static str,
}

impl PreviewSentences {
    /// Build a table from `(language, sentence)` pairs.
    ///
    /// Panics if the table has no entry for [`DEFAULT_PREVIEW_LANGUAGE`].
    pub fn new(entries: &[(&'static str, &'static str)]) -> Self {
        let sentences: HashMap<_, _> = entries.iter().copied().collect();
        let default_sentence = *sentences
            .get(DEFAULT_PREVIEW_LANGUAGE)
            .unwrap_or_else(|| panic!("preview table must contain {}", DEFAULT_PREVIEW_LANGUAGE));

        Self {
            sentences,
            default_sentence,
        }
    }

    /// Sentence for `language`, or the en-US sentence when none is registered
    pub fn lookup(&self, language: &str) -> &'static str {
        self.sentences
            .get(language)
            .copied()
            .unwrap_or(self.default_sentence)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.sentences.contains_key(language)
    }

    /// All languages with a curated sentence, sorted
    pub fn supported_languages(&self) -> Vec<&'static str> {
        let mut languages: Vec<_> = self.sentences.keys().copied().collect();
        languages.sort_unstable();
        languages
    }
}

/// The compiled-in preview table
pub fn preview_sentences() -> &'static PreviewSentences {
    static TABLE: OnceLock<PreviewSentences> = OnceLock::new();
    TABLE.get_or_init(|| PreviewSentences::new(PREVIEW_SENTENCES))
}

/// Look up the preview sentence for a language code
pub fn lookup_preview_sentence(language: &str) -> &'static str {
    preview_sentences().lookup(language)
}
