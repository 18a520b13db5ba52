use super::Language;

/// Strings shown to the user, one table per language.
#[derive(Debug)]
pub struct Translations {
    pub welcome: &'static str,
    pub home: &'static str,
    pub chats: &'static str,
    pub settings: &'static str,
    pub profile: &'static str,
    pub products: &'static str,
    pub help: &'static str,
    pub language: &'static str,
    pub theme: &'static str,
    pub light_mode: &'static str,
    pub dark_mode: &'static str,
    pub logout: &'static str,
    pub new_chat: &'static str,
    pub type_message: &'static str,
    pub delete_chat: &'static str,
    pub resume_chat: &'static str,
    pub no_chats: &'static str,
    pub no_messages: &'static str,
    pub no_active_chat: &'static str,
    pub coming_soon: &'static str,
    pub what_is_celora: &'static str,
    pub is_data_safe: &'static str,
    pub thinking: &'static str,
    pub api_key_missing: &'static str,
    pub user_api_key_missing: &'static str,
    pub no_response: &'static str,
}

const EN: Translations = Translations {
    welcome: "Welcome to Celora AI",
    home: "Home",
    chats: "Chats",
    settings: "Settings",
    profile: "Profile",
    products: "Products",
    help: "Help Center",
    language: "Language",
    theme: "Theme",
    light_mode: "Light",
    dark_mode: "Dark",
    logout: "Log out",
    new_chat: "New Chat",
    type_message: "Type a message...",
    delete_chat: "Delete chat",
    resume_chat: "Resume",
    no_chats: "No active chats yet",
    no_messages: "No messages yet",
    no_active_chat: "No active chat. Type /new to start one.",
    coming_soon: "Coming soon",
    what_is_celora: "What is Celora AI?",
    is_data_safe: "Is my data safe?",
    thinking: "Thinking...",
    api_key_missing: "Error: API key is not configured in the environment.",
    user_api_key_missing: "Error: API key is not set. Add your key with /key or `celora settings --api-key`.",
    no_response: "I'm sorry, I couldn't generate a response.",
};

const RU: Translations = Translations {
    welcome: "Добро пожаловать в Celora AI",
    home: "Главная",
    chats: "Чаты",
    settings: "Настройки",
    profile: "Профиль",
    products: "Продукты",
    help: "Центр помощи",
    language: "Язык",
    theme: "Тема",
    light_mode: "Светлая",
    dark_mode: "Тёмная",
    logout: "Выйти",
    new_chat: "Новый чат",
    type_message: "Введите сообщение...",
    delete_chat: "Удалить чат",
    resume_chat: "Продолжить",
    no_chats: "Пока нет активных чатов",
    no_messages: "Сообщений пока нет",
    no_active_chat: "Нет активного чата. Введите /new, чтобы начать.",
    coming_soon: "Скоро",
    what_is_celora: "Что такое Celora AI?",
    is_data_safe: "Мои данные в безопасности?",
    thinking: "Думаю...",
    api_key_missing: "Ошибка: API-ключ не настроен в окружении.",
    user_api_key_missing: "Ошибка: API-ключ не задан. Добавьте ключ командой /key или `celora settings --api-key`.",
    no_response: "Извините, не удалось сгенерировать ответ.",
};

const UZ: Translations = Translations {
    welcome: "Celora AI ga xush kelibsiz",
    home: "Bosh sahifa",
    chats: "Suhbatlar",
    settings: "Sozlamalar",
    profile: "Profil",
    products: "Mahsulotlar",
    help: "Yordam markazi",
    language: "Til",
    theme: "Mavzu",
    light_mode: "Yorug'",
    dark_mode: "Qorong'i",
    logout: "Chiqish",
    new_chat: "Yangi suhbat",
    type_message: "Xabar yozing...",
    delete_chat: "Suhbatni o'chirish",
    resume_chat: "Davom ettirish",
    no_chats: "Hozircha faol suhbatlar yo'q",
    no_messages: "Hozircha xabarlar yo'q",
    no_active_chat: "Faol suhbat yo'q. Boshlash uchun /new kiriting.",
    coming_soon: "Tez kunda",
    what_is_celora: "Celora AI nima?",
    is_data_safe: "Ma'lumotlarim xavfsizmi?",
    thinking: "O'ylayapman...",
    api_key_missing: "Xato: API kaliti muhitda sozlanmagan.",
    user_api_key_missing: "Xato: API kaliti kiritilmagan. Kalitni /key yoki `celora settings --api-key` orqali qo'shing.",
    no_response: "Kechirasiz, javob yarata olmadim.",
};

impl Translations {
    pub fn for_language(language: Language) -> &'static Translations {
        match language {
            Language::En => &EN,
            Language::Ru => &RU,
            Language::Uz => &UZ,
        }
    }
}
