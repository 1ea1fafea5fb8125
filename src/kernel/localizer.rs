use super::language::Language;

/// Every user-visible message the assistant can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Opening,
    LookingUp,
    Searching,
    Playing,
    LanguageChanged,
    MathAnswer,
    MathTricky,
    DateTime,
    Greeting,
    Identity,
    Farewell,
    NamedGreeting,
    GroupGreeting,
    Fallback,
    LookupNotFound,
    LookupFailed,
    ReadMore,
    WelcomeMorning,
    WelcomeAfternoon,
    WelcomeEvening,
    WelcomeNight,
    HistoryEmpty,
    HistoryCleared,
}

/// Template for `key` in `language`; `{0}`, `{1}`, ... are parameters.
pub fn template(key: MessageKey, language: Language) -> Option<&'static str> {
    use Language::*;
    use MessageKey::*;

    let text = match (key, language) {
        (Opening, English) => "Opening {0}...",
        (Opening, Hindi) => "{0} खोल रहा हूँ...",
        (Opening, Bengali) => "{0} খুলছি...",

        (LookingUp, English) => "Looking up information about {0}...",
        (LookingUp, Hindi) => "मैं {0} के बारे में जानकारी ढूंढ रहा हूँ...",
        (LookingUp, Bengali) => "আমি {0} সম্পর্কে তথ্য খুঁজছি...",

        (Searching, English) => "Searching for \"{0}\" on Google...",
        (Searching, Hindi) => "\"{0}\" को Google पर खोज रहा हूँ...",
        (Searching, Bengali) => "\"{0}\" গুগলে খুঁজছি...",

        (Playing, English) => "Playing \"{0}\" on YouTube...",
        (Playing, Hindi) => "\"{0}\" चला रहा हूँ YouTube पर...",
        (Playing, Bengali) => "\"{0}\" ইউটিউবে চালাচ্ছি...",

        (LanguageChanged, English) => "Language changed to English.",
        (LanguageChanged, Hindi) => "अब मैं हिंदी में बोलूंगा।",
        (LanguageChanged, Bengali) => "ভাষা বাংলা করা হয়েছে। এখন আমি বাংলায় কথা বলব।",

        (MathAnswer, English) => "The answer is {0}.",
        (MathAnswer, Hindi) => "उत्तर है {0}।",
        (MathAnswer, Bengali) => "উত্তর হল {0}।",

        (MathTricky, English) => "Hmm, that math looks tricky. Can you try again?",
        (MathTricky, Hindi) => "यह गणित थोड़ा कठिन है। कृपया फिर से पूछें।",
        (MathTricky, Bengali) => "এই অঙ্কটা একটু কঠিন। আবার বলো।",

        (DateTime, English) => "Today is {0}, and the current time is {1}.",
        (DateTime, Hindi) => "आज की तारीख {0} है और समय {1} है।",
        (DateTime, Bengali) => "আজকের তারিখ {0} এবং সময় {1}।",

        (Greeting, English) => "Hello! I'm Golu. How can I help you today?",
        (Greeting, Hindi) => "हैलो! मैं गोलू हूँ। आपकी क्या मदद कर सकता हूँ?",
        (Greeting, Bengali) => "হ্যালো! আমি গোলু। আমি আপনাকে কিভাবে সাহায্য করতে পারি?",

        (Identity, English) => "My name is Golu. I'm here to help you with anything you need!",
        (Identity, Hindi) => "मेरा नाम गोलू है। मैं आपकी मदद के लिए यहाँ हूँ!",
        (Identity, Bengali) => "আমার নাম গোলু। আমি তোমার সাহায্য করতে এখানে আছি!",

        (Farewell, English) => "Goodbye! Have a wonderful day!",
        (Farewell, Hindi) => "अलविदा! अपना ख्याल रखना!",
        (Farewell, Bengali) => "বিদায়! ভালো থেকো!",

        (NamedGreeting, English) => "Hello {0}! 👋",
        (NamedGreeting, Hindi) => "नमस्ते {0} जी! 😊",
        (NamedGreeting, Bengali) => "হ্যালো {0}! 😊",

        (GroupGreeting, English) => "Hello everyone! 👋",
        (GroupGreeting, Hindi) => "नमस्ते दोस्तों! 😊",
        (GroupGreeting, Bengali) => "হ্যালো বন্ধুরা! 😊",

        (Fallback, English) => "Sorry, I didn't understand that. Could you try again?",
        (Fallback, Hindi) => "माफ कीजिए, मैं समझ नहीं पाया। क्या आप दोबारा कह सकते हैं?",
        (Fallback, Bengali) => "দুঃখিত, আমি বুঝতে পারিনি। আপনি আবার বলতে পারেন?",

        (LookupNotFound, English) => "Sorry, I couldn't find information about that.",
        (LookupNotFound, Hindi) => "माफ कीजिए, मैं इस विषय पर जानकारी नहीं ढूंढ पाया।",
        (LookupNotFound, Bengali) => "দুঃখিত, আমি এই বিষয়ে তথ্য খুঁজে পাইনি।",

        (LookupFailed, English) => "Something went wrong while fetching the information.",
        (LookupFailed, Hindi) => "जानकारी प्राप्त करते समय कोई समस्या आई।",
        (LookupFailed, Bengali) => "তথ্য পাওয়ার সময় একটি সমস্যা হয়েছে।",

        (ReadMore, English) => "👉 Read more: {0}",
        (ReadMore, Hindi) => "👉 और पढ़ें: {0}",
        (ReadMore, Bengali) => "👉 আরও পড়ুন: {0}",

        (WelcomeMorning, English) => "Good morning! I'm Golu, your assistant. What can I do for you today?",
        (WelcomeMorning, Hindi) => "सुप्रभात! मैं गोलू हूँ, आपका सहायक। आज मैं आपके लिए क्या कर सकता हूँ?",
        (WelcomeMorning, Bengali) => "সুপ্রভাত! আমি গোলু, তোমার সহকারী। আজ আমি তোমার জন্য কী করতে পারি?",

        (WelcomeAfternoon, English) => "Good afternoon! I'm Golu, your assistant. How can I assist you?",
        (WelcomeAfternoon, Hindi) => "नमस्कार! मैं गोलू हूँ, आपका सहायक। मैं आपकी कैसे मदद करूँ?",
        (WelcomeAfternoon, Bengali) => "শুভ অপরাহ্ন! আমি গোলু, তোমার সহকারী। আমি কীভাবে সাহায্য করতে পারি?",

        (WelcomeEvening, English) => "Good evening! I'm Golu, your assistant. What do you need help with?",
        (WelcomeEvening, Hindi) => "शुभ संध्या! मैं गोलू हूँ, आपका सहायक। आपको किस चीज़ में मदद चाहिए?",
        (WelcomeEvening, Bengali) => "শুভ সন্ধ্যা! আমি গোলু, তোমার সহকারী। তোমার কী সাহায্য লাগবে?",

        (WelcomeNight, English) => "Hello night owl! I'm Golu, your assistant. What brings you here so late?",
        (WelcomeNight, Hindi) => "अरे, रात के उल्लू! मैं गोलू हूँ, आपका सहायक। इतनी रात को कैसे आना हुआ?",
        (WelcomeNight, Bengali) => "হ্যালো রাতজাগা বন্ধু! আমি গোলু, তোমার সহকারী। এত রাতে কী মনে করে?",

        (HistoryEmpty, English) => "No commands yet",
        (HistoryEmpty, Hindi) => "अभी तक कोई कमांड नहीं",
        (HistoryEmpty, Bengali) => "এখনও কোনো কমান্ড নেই",

        (HistoryCleared, English) => "Conversation history cleared.",
        (HistoryCleared, Hindi) => "बातचीत का इतिहास मिटा दिया गया।",
        (HistoryCleared, Bengali) => "কথোপকথনের ইতিহাস মুছে ফেলা হয়েছে।",
    };

    Some(text)
}

/// Localized text for `key`, falling back to English when a translation
/// is missing.
pub fn localize(key: MessageKey, language: Language, params: &[&str]) -> String {
    localize_from(template, key, language, params)
}

pub fn localize_from<F>(catalog: F, key: MessageKey, language: Language, params: &[&str]) -> String
where
    F: Fn(MessageKey, Language) -> Option<&'static str>,
{
    let template = catalog(key, language)
        .or_else(|| catalog(key, Language::English))
        .unwrap_or_default();
    interpolate(template, params)
}

fn interpolate(template: &str, params: &[&str]) -> String {
    let mut text = template.to_string();
    for (index, value) in params.iter().enumerate() {
        text = text.replace(&format!("{{{}}}", index), value);
    }
    text
}

/// Generic reply when no intent matched.
pub fn fallback_text(language: Language) -> String {
    localize(MessageKey::Fallback, language, &[])
}
