//! UI labels in English and Simplified Chinese.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Cn,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Cn => "cn",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "cn" | "zh" | "zh-cn" => Some(Language::Cn),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::En => Language::Cn,
            Language::Cn => Language::En,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    AppName,
    NavChat,
    NavKbChat,
    NavKbSettings,
    NavFiles,
    NavEmbeddings,
    NavOcr,
    ThemeLight,
    ThemeDark,
    ThemeSystem,
    LanguageToggle,
    Send,
    Clear,
    Instructions,
    InstructionsPlaceholder,
    PromptPlaceholder,
    Temperature,
    MaximumLength,
    TopP,
    KnowledgeBase,
    SelectKnowledgeBase,
    NoKnowledgeBases,
    CreateKnowledgeBase,
    DeleteKnowledgeBase,
    DeleteKnowledgeBaseConfirm,
    Name,
    Create,
    Cancel,
    Delete,
    Files,
    Vector,
    Upload,
    Uploading,
    Columns,
    Reset,
    FilterFilenames,
    RowsPerPage,
    Page,
    Of,
    RowsSelected,
    NoResults,
    Loading,
    ColId,
    ColFilename,
    ColSize,
    ColCreated,
    ColIndex,
    ColText,
    ColDimension,
    ColActions,
    CopyId,
    CreateEmbeddings,
    OcrChooseImage,
    OcrResult,
    NotFoundTitle,
    NotFoundLink,
    Copied,
}

/// Label text for `lang`.
pub fn t(lang: Language, label: Label) -> &'static str {
    match lang {
        Language::En => en(label),
        Language::Cn => cn(label),
    }
}

fn en(label: Label) -> &'static str {
    use Label::*;
    match label {
        AppName => "zxrag",
        NavChat => "Chat",
        NavKbChat => "KB Q&A",
        NavKbSettings => "KB Settings",
        NavFiles => "Files",
        NavEmbeddings => "Embeddings",
        NavOcr => "OCR",
        ThemeLight => "Light",
        ThemeDark => "Dark",
        ThemeSystem => "System",
        LanguageToggle => "中文",
        Send => "Submit",
        Clear => "Clear",
        Instructions => "Instructions",
        InstructionsPlaceholder => "Fix the grammar.",
        PromptPlaceholder => "Type your message here.",
        Temperature => "Temperature",
        MaximumLength => "Maximum Length",
        TopP => "Top P",
        KnowledgeBase => "Knowledge Base",
        SelectKnowledgeBase => "Select a knowledge base",
        NoKnowledgeBases => "No knowledge bases yet.",
        CreateKnowledgeBase => "Create knowledge base",
        DeleteKnowledgeBase => "Delete knowledge base",
        DeleteKnowledgeBaseConfirm => "This permanently deletes the knowledge base and its files.",
        Name => "Name",
        Create => "Create",
        Cancel => "Cancel",
        Delete => "Delete",
        Files => "Files",
        Vector => "Vector",
        Upload => "Upload",
        Uploading => "Uploading...",
        Columns => "Columns",
        Reset => "Reset",
        FilterFilenames => "Filter filenames...",
        RowsPerPage => "Rows per page",
        Page => "Page",
        Of => "of",
        RowsSelected => "row(s) selected.",
        NoResults => "No results.",
        Loading => "Loading...",
        ColId => "ID",
        ColFilename => "Filename",
        ColSize => "Size",
        ColCreated => "Created",
        ColIndex => "Index",
        ColText => "Text",
        ColDimension => "Dimension",
        ColActions => "Actions",
        CopyId => "Copy ID",
        CreateEmbeddings => "Create embeddings",
        OcrChooseImage => "Choose an image",
        OcrResult => "Result",
        NotFoundTitle => "Nothing to see here!",
        NotFoundLink => "Go to the home page",
        Copied => "Copied to clipboard",
    }
}

fn cn(label: Label) -> &'static str {
    use Label::*;
    match label {
        AppName => "zxrag",
        NavChat => "聊天",
        NavKbChat => "知识库问答",
        NavKbSettings => "知识库设置",
        NavFiles => "文件",
        NavEmbeddings => "向量",
        NavOcr => "OCR",
        ThemeLight => "浅色",
        ThemeDark => "深色",
        ThemeSystem => "跟随系统",
        LanguageToggle => "EN",
        Send => "提交",
        Clear => "清空",
        Instructions => "指令",
        InstructionsPlaceholder => "修正语法。",
        PromptPlaceholder => "在此输入消息。",
        Temperature => "温度",
        MaximumLength => "最大长度",
        TopP => "Top P",
        KnowledgeBase => "知识库",
        SelectKnowledgeBase => "选择知识库",
        NoKnowledgeBases => "暂无知识库。",
        CreateKnowledgeBase => "创建知识库",
        DeleteKnowledgeBase => "删除知识库",
        DeleteKnowledgeBaseConfirm => "此操作将永久删除该知识库及其文件。",
        Name => "名称",
        Create => "创建",
        Cancel => "取消",
        Delete => "删除",
        Files => "文件",
        Vector => "向量",
        Upload => "上传",
        Uploading => "上传中...",
        Columns => "列",
        Reset => "重置",
        FilterFilenames => "筛选文件名...",
        RowsPerPage => "每页行数",
        Page => "第",
        Of => "页，共",
        RowsSelected => "行已选择。",
        NoResults => "无结果。",
        Loading => "加载中...",
        ColId => "ID",
        ColFilename => "文件名",
        ColSize => "大小",
        ColCreated => "创建时间",
        ColIndex => "序号",
        ColText => "文本",
        ColDimension => "维度",
        ColActions => "操作",
        CopyId => "复制 ID",
        CreateEmbeddings => "生成向量",
        OcrChooseImage => "选择图片",
        OcrResult => "结果",
        NotFoundTitle => "这里什么都没有！",
        NotFoundLink => "返回首页",
        Copied => "已复制到剪贴板",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("CN"), Some(Language::Cn));
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::En.toggled(), Language::Cn);
    }

    #[test]
    fn labels_differ_between_languages() {
        assert_eq!(t(Language::En, Label::NavChat), "Chat");
        assert_ne!(t(Language::Cn, Label::NavChat), t(Language::En, Label::NavChat));
    }
}
