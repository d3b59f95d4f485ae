//! Boilerplate member blocks injected into entity classes.
//!
//! Each block starts with a newline and ends without one, so that splicing it
//! just before the newline that precedes a closing brace leaves the brace on
//! its own line.

/// Members required by `ISoftDeletableEntity`.
pub const SOFT_DELETE_TEMPLATE: &str = r#"
    // Implementação de ISoftDeletableEntity

    /// <summary>
    /// Indica se a entidade foi excluída logicamente
    /// </summary>
    public bool Excluido { get; set; } = false;

    /// <summary>
    /// Data da exclusão lógica
    /// </summary>
    public DateTime? DataExclusao { get; set; }

    /// <summary>
    /// Usuário responsável pela exclusão
    /// </summary>
    [StringLength(100)]
    public string? UsuarioExclusao { get; set; }

    /// <summary>
    /// Motivo da exclusão para auditoria
    /// </summary>
    [StringLength(500)]
    public string? MotivoExclusao { get; set; }

    /// <summary>
    /// Marca a entidade como excluída logicamente
    /// </summary>
    public void MarkAsDeleted(string? usuarioId = null, string? motivo = null)
    {
        Excluido = true;
        DataExclusao = DateTime.UtcNow;
        UsuarioExclusao = usuarioId;
        MotivoExclusao = motivo;
    }

    /// <summary>
    /// Restaura uma entidade excluída logicamente
    /// </summary>
    public void Restore()
    {
        Excluido = false;
        DataExclusao = null;
        UsuarioExclusao = null;
        MotivoExclusao = null;
    }"#;

/// Members required by `IArchivableEntity`.
pub const ARCHIVABLE_TEMPLATE: &str = r#"
    // Implementação de IArchivableEntity

    /// <summary>
    /// Indica se a entidade foi arquivada
    /// </summary>
    public bool Arquivado { get; set; } = false;

    /// <summary>
    /// Data do arquivamento
    /// </summary>
    public DateTime? DataArquivamento { get; set; }

    /// <summary>
    /// Data da última movimentação/atividade da entidade
    /// </summary>
    public DateTime UltimaMovimentacao { get; set; } = DateTime.UtcNow;

    /// <summary>
    /// Atualiza a data da última movimentação
    /// </summary>
    public void AtualizarUltimaMovimentacao()
    {
        UltimaMovimentacao = DateTime.UtcNow;
    }"#;
