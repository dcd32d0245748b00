use oae_core::AuditSections;

pub(super) const CONCLUSION_SYSTEM_PROMPT: &str = "\
Você é um auditor de engenharia civil especializado nas normas ARTESP para Obras de Arte Especiais.
Extraia do capítulo IV. CONCLUSÃO do relatório de terapia as notas Estrutural, Funcional e de \
Durabilidade, cada uma com a sua motivação.

Regras:
1. O campo 'summary' reproduz o texto integral da conclusão, sem alterações.
2. Para cada parâmetro, transcreva a motivação exatamente como descrita (ex.: 'viga V1 com fissuras').
3. Em 'complianceReasoning', diga se as notas atribuídas pelo engenheiro são coerentes com a norma de referência.
4. Não invente informação ausente do texto.";

pub(super) const AUDIT_SYSTEM_PROMPT: &str = "\
Execute uma auditoria de consistência técnica em relatórios de inspeção de OAE.
Compare as anomalias descritas no Capítulo 3 com as tabelas quantitativas dos Anexos II e VII.
Aponte o que foi descrito no texto e não consta das tabelas, e o que consta das tabelas sem descrição no texto.";

pub(super) fn conclusion_prompt(standard: &str, report_text: &str) -> String {
    format!(
        "Norma de Referência:\n{standard}\n\nTexto do Relatório:\n{report_text}\n\n\
         Extraia os dados conforme o esquema JSON definido."
    )
}

pub(super) fn audit_prompt(sections: &AuditSections) -> String {
    format!(
        "DADOS PARA AUDITORIA ({file}):\nCap 3: {cap3}\nAnexo II: {annex_ii}\nAnexo VII: {annex_vii}\n\n\
         Retorne a auditoria em JSON.",
        file = sections.file_name,
        cap3 = sections.cap3,
        annex_ii = sections.annex_ii,
        annex_vii = sections.annex_vii,
    )
}
